use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DIAGNOSIS_TIMEOUT_MS: u64 = 20_000;
pub const MIN_DIAGNOSIS_TIMEOUT_MS: u64 = 1_000;
pub const MAX_DIAGNOSIS_TIMEOUT_MS: u64 = 120_000;
pub const MAX_SYMPTOM_LENGTH: usize = 2_000;

/// Vehicle-issue advisory boundary. The core hands the shell a symptom
/// description and gets back exactly one structured `Diagnosis` or an
/// explicit failure; which vendor (if any) answers is the shell's business.
pub struct Advisor<Ev> {
    context: CapabilityContext<AdvisorOperation, Ev>,
}

impl<Ev> Capability<Ev> for Advisor<Ev> {
    type Operation = AdvisorOperation;
    type MappedSelf<MappedEv> = Advisor<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Advisor::new(self.context.map_event(f))
    }
}

impl<Ev> Advisor<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<AdvisorOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn diagnose<F>(&self, query: DiagnosisQuery, make_event: F)
    where
        F: FnOnce(AdvisorResult) -> Ev + Send + 'static,
    {
        let query = query.validated();
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context
                .request_from_shell(AdvisorOperation::Diagnose { query })
                .await;
            context.update_app(make_event(result));
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisorOperation {
    Diagnose { query: DiagnosisQuery },
}

impl Operation for AdvisorOperation {
    type Output = AdvisorResult;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisQuery {
    pub symptoms: String,
    pub timeout_ms: u64,
}

impl DiagnosisQuery {
    #[must_use]
    pub fn new(symptoms: impl Into<String>) -> Self {
        Self {
            symptoms: symptoms.into(),
            timeout_ms: DEFAULT_DIAGNOSIS_TIMEOUT_MS,
        }
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn validated(mut self) -> Self {
        self.symptoms = self.symptoms.trim().to_string();
        if self.symptoms.chars().count() > MAX_SYMPTOM_LENGTH {
            self.symptoms = self.symptoms.chars().take(MAX_SYMPTOM_LENGTH).collect();
        }
        self.timeout_ms = self
            .timeout_ms
            .clamp(MIN_DIAGNOSIS_TIMEOUT_MS, MAX_DIAGNOSIS_TIMEOUT_MS);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    // The advisory contract predates this crate and speaks French; accept
    // both spellings it has been seen using.
    #[serde(alias = "Mineure", alias = "Mineur", alias = "Minor")]
    Minor,
    #[serde(alias = "Modéré", alias = "Modérée", alias = "Moderate")]
    Moderate,
    #[serde(alias = "Critique", alias = "Critical")]
    Critical,
}

impl Severity {
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "minor" | "mineure" | "mineur" => Some(Self::Minor),
            "moderate" | "modéré" | "modérée" | "modere" => Some(Self::Moderate),
            "critical" | "critique" => Some(Self::Critical),
            _ => None,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Minor => "Mineure",
            Self::Moderate => "Modéré",
            Self::Critical => "Critique",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[serde(alias = "Bas", alias = "Basse", alias = "Low")]
    Low,
    #[serde(alias = "Moyen", alias = "Moyenne", alias = "Medium")]
    Medium,
    #[serde(alias = "Élevé", alias = "Elevé", alias = "Haute", alias = "High")]
    High,
}

impl RiskLevel {
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" | "bas" | "basse" => Some(Self::Low),
            "medium" | "moyen" | "moyenne" => Some(Self::Medium),
            "high" | "élevé" | "eleve" | "haute" => Some(Self::High),
            _ => None,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Bas",
            Self::Medium => "Moyen",
            Self::High => "Élevé",
        }
    }
}

/// Structured advisory output. Immutable once produced; the model keeps at
/// most the latest one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub issue_title: String,
    pub severity: Severity,
    pub risk_level: RiskLevel,
    pub time_estimate: String,
    pub estimated_cost: String,
    pub recommended_action: String,
    pub safety_steps: Vec<String>,
    pub parts_needed: Vec<String>,
    pub mechanic_type: String,
}

impl Diagnosis {
    /// Parses a raw advisory reply. Tolerates the markdown code fences some
    /// backends wrap JSON in.
    pub fn from_reply(raw: &str) -> Result<Self, AdvisorError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AdvisorError::NoContent);
        }

        let body = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .map_or(trimmed, |rest| rest.strip_suffix("```").unwrap_or(rest))
            .trim();

        serde_json::from_str(body).map_err(|e| AdvisorError::Malformed {
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AdvisorError {
    #[error("advisor is not configured")]
    NotConfigured,

    #[error("advisor returned no content")]
    NoContent,

    #[error("advisor reply could not be parsed: {reason}")]
    Malformed { reason: String },

    #[error("advisor call failed with status {status}")]
    Api { status: u16 },

    #[error("advisor call failed: {reason}")]
    Network { reason: String },

    #[error("advisor call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl AdvisorError {
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Api { status } => *status >= 500,
            Self::NotConfigured | Self::NoContent | Self::Malformed { .. } => false,
        }
    }
}

pub type AdvisorResult = Result<Diagnosis, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_json() -> &'static str {
        r#"{
            "issue_title": "Problème de moteur détecté",
            "severity": "Modéré",
            "risk_level": "Moyen",
            "time_estimate": "45-60 min",
            "estimated_cost": "25.000-35.000F",
            "recommended_action": "Diagnostic complet du moteur par un expert.",
            "safety_steps": ["Éteignez le moteur", "Laissez refroidir 15-20 minutes"],
            "parts_needed": ["Bougies d'allumage", "Filtre à air"],
            "mechanic_type": "Mécanicien moteur spécialisé"
        }"#
    }

    #[test]
    fn test_from_reply_parses_contract() {
        let diagnosis = Diagnosis::from_reply(reply_json()).expect("valid reply");
        assert_eq!(diagnosis.issue_title, "Problème de moteur détecté");
        assert_eq!(diagnosis.severity, Severity::Moderate);
        assert_eq!(diagnosis.risk_level, RiskLevel::Medium);
        assert_eq!(diagnosis.safety_steps.len(), 2);
    }

    #[test]
    fn test_from_reply_strips_code_fences() {
        let fenced = format!("```json\n{}\n```", reply_json());
        assert!(Diagnosis::from_reply(&fenced).is_ok());
    }

    #[test]
    fn test_from_reply_rejects_empty() {
        assert_eq!(Diagnosis::from_reply("   "), Err(AdvisorError::NoContent));
    }

    #[test]
    fn test_from_reply_rejects_junk() {
        assert!(matches!(
            Diagnosis::from_reply("pas du json"),
            Err(AdvisorError::Malformed { .. })
        ));
    }

    #[test]
    fn test_severity_aliases() {
        assert_eq!(Severity::from_str("Mineure"), Some(Severity::Minor));
        assert_eq!(Severity::from_str("critical"), Some(Severity::Critical));
        assert_eq!(RiskLevel::from_str("Haute"), Some(RiskLevel::High));
        assert_eq!(RiskLevel::from_str("Bas"), Some(RiskLevel::Low));
        assert_eq!(RiskLevel::from_str("inconnu"), None);
    }

    #[test]
    fn test_query_validation_clamps_timeout() {
        let query = DiagnosisQuery::new("  bruit au freinage  ")
            .with_timeout_ms(10)
            .validated();
        assert_eq!(query.symptoms, "bruit au freinage");
        assert_eq!(query.timeout_ms, MIN_DIAGNOSIS_TIMEOUT_MS);

        let query = DiagnosisQuery::new("x")
            .with_timeout_ms(10_000_000)
            .validated();
        assert_eq!(query.timeout_ms, MAX_DIAGNOSIS_TIMEOUT_MS);
    }

    #[test]
    fn test_query_validation_caps_length() {
        let long = "a".repeat(MAX_SYMPTOM_LENGTH + 50);
        let query = DiagnosisQuery::new(long).validated();
        assert_eq!(query.symptoms.chars().count(), MAX_SYMPTOM_LENGTH);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(AdvisorError::Timeout { timeout_ms: 20_000 }.is_retryable());
        assert!(AdvisorError::Api { status: 503 }.is_retryable());
        assert!(!AdvisorError::Api { status: 401 }.is_retryable());
        assert!(!AdvisorError::NotConfigured.is_retryable());
        assert!(!AdvisorError::Malformed {
            reason: "x".into()
        }
        .is_retryable());
    }
}
