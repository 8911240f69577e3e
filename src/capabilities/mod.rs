mod advisor;

pub use self::advisor::{
    Advisor, AdvisorError, AdvisorOperation, AdvisorResult, Diagnosis, DiagnosisQuery, RiskLevel,
    Severity, DEFAULT_DIAGNOSIS_TIMEOUT_MS, MAX_DIAGNOSIS_TIMEOUT_MS, MAX_SYMPTOM_LENGTH,
    MIN_DIAGNOSIS_TIMEOUT_MS,
};

pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

pub type AppRender = Render<Event>;
pub type AppAdvisor = Advisor<Event>;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub render: Render<Event>,
    pub advisor: Advisor<Event>,
}
