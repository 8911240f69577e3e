use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::capabilities::Diagnosis;
use crate::{
    AppError, TransitionError, UnixTimeMs, BATTERY_CALLOUT_CFA, DEFAULT_ESTIMATED_MINUTES,
    DEFAULT_PICKUP_LOCATION, NEXT_SERVICE_INTERVAL_MONTHS, STANDARD_CALLOUT_CFA, TIRE_CALLOUT_CFA,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionId(pub String);

impl MissionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub String);

impl VehicleId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MechanicId(pub String);

impl MechanicId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MechanicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Tire,
    Battery,
    Engine,
    Fuel,
    Towing,
    Other,
}

impl ServiceType {
    pub const ALL: [Self; 6] = [
        Self::Tire,
        Self::Battery,
        Self::Engine,
        Self::Fuel,
        Self::Towing,
        Self::Other,
    ];

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tire" | "tyre" | "pneu" => Some(Self::Tire),
            "battery" | "batterie" => Some(Self::Battery),
            "engine" | "moteur" => Some(Self::Engine),
            "fuel" | "essence" => Some(Self::Fuel),
            "towing" | "tow" | "remorquage" => Some(Self::Towing),
            "other" | "autre" => Some(Self::Other),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tire => "tire",
            Self::Battery => "battery",
            Self::Engine => "engine",
            Self::Fuel => "fuel",
            Self::Towing => "towing",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Tire => "Pneu crevé",
            Self::Battery => "Batterie à plat",
            Self::Engine => "Panne moteur",
            Self::Fuel => "Panne d'essence",
            Self::Towing => "Remorquage",
            Self::Other => "Autre panne",
        }
    }

    /// Fixed callout estimate per service type. Estimates never come from the
    /// advisor.
    #[must_use]
    pub const fn estimate(self) -> ServiceEstimate {
        let cost_cfa = match self {
            Self::Tire => TIRE_CALLOUT_CFA,
            Self::Battery => BATTERY_CALLOUT_CFA,
            Self::Engine | Self::Fuel | Self::Towing | Self::Other => STANDARD_CALLOUT_CFA,
        };
        ServiceEstimate {
            cost_cfa,
            minutes: DEFAULT_ESTIMATED_MINUTES,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEstimate {
    pub cost_cfa: u64,
    pub minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Assigned,
    OnWay,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" | "open" => Some(Self::Pending),
            "assigned" => Some(Self::Assigned),
            "on_way" | "onway" | "en_route" => Some(Self::OnWay),
            "in_progress" | "inprogress" => Some(Self::InProgress),
            "completed" | "done" | "closed" => Some(Self::Completed),
            "cancelled" | "canceled" | "aborted" => Some(Self::Cancelled),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::OnWay => "on_way",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Assigned => "Assigné",
            Self::OnWay => "En route",
            Self::InProgress => "En cours",
            Self::Completed => "Terminé",
            Self::Cancelled => "Annulé",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    #[must_use]
    pub fn valid_transitions(self) -> Vec<Self> {
        match self {
            Self::Pending => vec![Self::Assigned, Self::Cancelled],
            Self::Assigned => vec![Self::OnWay, Self::Cancelled],
            Self::OnWay => vec![Self::InProgress, Self::Cancelled],
            Self::InProgress => vec![Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => vec![],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        self.valid_transitions().contains(&to)
    }

    pub fn validate_transition(self, to: Self) -> Result<(), TransitionError<Self>> {
        if self == to {
            return Err(TransitionError::SameStatus);
        }
        if self.is_terminal() {
            return Err(TransitionError::FromTerminal { status: self });
        }
        if !self.can_transition_to(to) {
            return Err(TransitionError::Invalid { from: self, to });
        }
        Ok(())
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mechanic {
    pub id: MechanicId,
    pub name: String,
    pub rating: f32,
    pub jobs_completed: u32,
    pub specialties: Vec<String>,
    pub location: String,
    pub available: bool,
    pub response_time_min: u32,
}

/// One in-flight roadside-assistance request. The session holds at most one
/// live request at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub service: ServiceType,
    pub status: RequestStatus,
    pub location: String,
    pub estimated_minutes: u32,
    pub estimated_cost_cfa: u64,
    pub assigned_mechanic: Option<Mechanic>,
    pub created_at: UnixTimeMs,
    pub updated_at: UnixTimeMs,
}

impl ServiceRequest {
    #[must_use]
    pub fn new(service: ServiceType) -> Self {
        let estimate = service.estimate();
        let now = UnixTimeMs::now();
        Self {
            id: RequestId::generate(),
            service,
            status: RequestStatus::Pending,
            location: DEFAULT_PICKUP_LOCATION.to_string(),
            estimated_minutes: estimate.minutes,
            estimated_cost_cfa: estimate.cost_cfa,
            assigned_mechanic: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn transition(&mut self, next: RequestStatus) -> Result<(), TransitionError<RequestStatus>> {
        self.status.validate_transition(next)?;
        self.status = next;
        self.updated_at = UnixTimeMs::now();
        Ok(())
    }

    pub fn assign(&mut self, mechanic: Mechanic) -> Result<(), TransitionError<RequestStatus>> {
        self.transition(RequestStatus::Assigned)?;
        self.assigned_mechanic = Some(mechanic);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gasoline" | "petrol" | "essence" => Some(Self::Gasoline),
            "diesel" => Some(Self::Diesel),
            "electric" | "électrique" | "electrique" => Some(Self::Electric),
            "hybrid" | "hybride" => Some(Self::Hybrid),
            _ => None,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Gasoline => "Essence",
            Self::Diesel => "Diesel",
            Self::Electric => "Électrique",
            Self::Hybrid => "Hybride",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Excellent,
    Good,
    NeedsAttention,
    Critical,
}

impl VehicleStatus {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Bon état",
            Self::NeedsAttention => "À surveiller",
            Self::Critical => "Critique",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub plate: String,
    pub color: String,
    pub fuel_type: FuelType,
    pub status: VehicleStatus,
    pub last_service: NaiveDate,
    pub next_service: NaiveDate,
    pub mileage_km: u32,
}

impl Vehicle {
    /// Registers a new vehicle from a validated payload. Fresh entries start
    /// in good shape with the next service six months out.
    #[must_use]
    pub fn register(payload: NewVehicle, today: NaiveDate) -> Self {
        let next_service = today
            .checked_add_months(Months::new(NEXT_SERVICE_INTERVAL_MONTHS))
            .unwrap_or(today);
        Self {
            id: VehicleId::generate(),
            brand: payload.brand.trim().to_string(),
            model: payload.model.trim().to_string(),
            year: payload.year,
            plate: payload.plate.trim().to_uppercase(),
            color: payload.color.trim().to_string(),
            fuel_type: payload.fuel_type,
            status: VehicleStatus::Good,
            last_service: today,
            next_service,
            mileage_km: 0,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub plate: String,
    pub color: String,
    pub fuel_type: FuelType,
}

impl NewVehicle {
    pub fn validate(&self) -> Result<(), VehicleValidationError> {
        if self.brand.trim().is_empty() {
            return Err(VehicleValidationError::MissingField { field: "marque" });
        }
        if self.model.trim().is_empty() {
            return Err(VehicleValidationError::MissingField { field: "modèle" });
        }
        if self.plate.trim().is_empty() {
            return Err(VehicleValidationError::MissingField {
                field: "immatriculation",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VehicleValidationError {
    #[error("Champ requis : {field}")]
    MissingField { field: &'static str },
}

impl From<VehicleValidationError> for AppError {
    fn from(e: VehicleValidationError) -> Self {
        AppError::new(crate::ErrorKind::Validation, e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Basic,
    Premium,
    Gold,
}

impl SubscriptionTier {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Premium => "PREMIUM",
            Self::Gold => "GOLD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subscription: SubscriptionTier,
}

/// Partial profile update; only non-empty fields are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub fn apply(&self, profile: &mut UserProfile) {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            profile.name = name.to_string();
        }
        if let Some(email) = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            profile.email = email.to_string();
        }
        if let Some(phone) = self
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            profile.phone = phone.to_string();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    #[default]
    Pending,
    // The legacy board spells this "in_progress"; accept both.
    #[serde(alias = "in_progress")]
    Accepted,
    Completed,
    Cancelled,
}

impl MissionStatus {
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" | "open" => Some(Self::Pending),
            "accepted" | "in_progress" | "inprogress" => Some(Self::Accepted),
            "completed" | "done" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Accepted => "En cours",
            Self::Completed => "Terminée",
            Self::Cancelled => "Annulée",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    #[must_use]
    pub const fn is_acceptable(self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn valid_transitions(self) -> Vec<Self> {
        match self {
            Self::Pending => vec![Self::Accepted, Self::Cancelled],
            Self::Accepted => vec![Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => vec![],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        self.valid_transitions().contains(&to)
    }

    pub fn validate_transition(self, to: Self) -> Result<(), TransitionError<Self>> {
        if self == to {
            return Err(TransitionError::SameStatus);
        }
        if self.is_terminal() {
            return Err(TransitionError::FromTerminal { status: self });
        }
        if !self.can_transition_to(to) {
            return Err(TransitionError::Invalid { from: self, to });
        }
        Ok(())
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A mechanic's view of a callout they may accept and fulfil.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub service: ServiceType,
    pub client: String,
    pub vehicle: String,
    pub location: String,
    pub status: MissionStatus,
    pub price_cfa: u64,
    pub duration_min: Option<u32>,
    pub rating: Option<u8>,
}

impl Mission {
    #[must_use]
    pub fn new(
        service: ServiceType,
        client: impl Into<String>,
        vehicle: impl Into<String>,
        location: impl Into<String>,
        price_cfa: u64,
    ) -> Self {
        Self {
            id: MissionId::generate(),
            service,
            client: client.into(),
            vehicle: vehicle.into(),
            location: location.into(),
            status: MissionStatus::Pending,
            price_cfa,
            duration_min: None,
            rating: None,
        }
    }

    pub fn transition(&mut self, next: MissionStatus) -> Result<(), TransitionError<MissionStatus>> {
        self.status.validate_transition(next)?;
        self.status = next;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MechanicStats {
    pub completed: u32,
    pub rating: f32,
    pub response_time_min: u32,
    pub satisfaction_pct: u8,
}

impl MechanicStats {
    pub fn record_completion(&mut self) {
        self.completed += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Earnings {
    pub today_cfa: u64,
    pub week_cfa: u64,
    pub month_cfa: u64,
    pub total_cfa: u64,
}

impl Earnings {
    /// Credits a completed mission. Only the daily and lifetime counters
    /// move; week/month are periodic aggregates refreshed elsewhere.
    pub fn record_payout(&mut self, amount_cfa: u64) {
        self.today_cfa = self.today_cfa.saturating_add(amount_cfa);
        self.total_cfa = self.total_cfa.saturating_add(amount_cfa);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    #[default]
    Dashboard,
    NewRequest,
    Tracking,
    Vehicles,
    Settings,
}

impl DashboardTab {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::NewRequest => "new_request",
            Self::Tracking => "tracking",
            Self::Vehicles => "vehicles",
            Self::Settings => "settings",
        }
    }
}

/// Single source of truth for one AutoAssist session. Mutated only by
/// `App::update`; the view layer sees read-only snapshots.
#[derive(Debug, Clone)]
pub struct Model {
    pub tab: DashboardTab,
    pub profile: UserProfile,
    pub vehicles: Vec<Vehicle>,
    pub active_request: Option<ServiceRequest>,
    pub diagnosis: Option<Diagnosis>,
    pub is_analyzing: bool,
    pub online: bool,
    pub missions: Vec<Mission>,
    pub active_mission_id: Option<MissionId>,
    pub stats: MechanicStats,
    pub earnings: Earnings,
    pub active_error: Option<AppError>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            tab: DashboardTab::default(),
            profile: demo_profile(),
            vehicles: demo_vehicles(),
            active_request: None,
            diagnosis: None,
            is_analyzing: false,
            online: true,
            missions: demo_missions(),
            active_mission_id: None,
            stats: MechanicStats {
                completed: 124,
                rating: 4.9,
                response_time_min: 8,
                satisfaction_pct: 96,
            },
            earnings: Earnings {
                today_cfa: 24_500,
                week_cfa: 89_000,
                month_cfa: 345_000,
                total_cfa: 1_245_000,
            },
            active_error: None,
        }
    }
}

impl Model {
    pub fn set_error(&mut self, error: AppError) {
        self.active_error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.active_error = None;
    }

    #[must_use]
    pub fn has_live_request(&self) -> bool {
        self.active_request
            .as_ref()
            .is_some_and(|r| !r.status.is_terminal())
    }

    #[must_use]
    pub fn active_mission(&self) -> Option<&Mission> {
        let id = self.active_mission_id.as_ref()?;
        self.missions.iter().find(|m| &m.id == id)
    }

    #[must_use]
    pub fn active_mission_mut(&mut self) -> Option<&mut Mission> {
        let id = self.active_mission_id.clone()?;
        self.missions.iter_mut().find(|m| m.id == id)
    }

    #[must_use]
    pub fn mission_mut(&mut self, id: &MissionId) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| &m.id == id)
    }

    #[must_use]
    pub fn pending_mission_count(&self) -> usize {
        self.missions
            .iter()
            .filter(|m| m.status.is_acceptable())
            .count()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn demo_profile() -> UserProfile {
    UserProfile {
        id: "user_001".into(),
        name: "Jean Dupont".into(),
        email: "jean.dupont@example.com".into(),
        phone: "+229 01 23 45 67".into(),
        subscription: SubscriptionTier::Gold,
    }
}

fn demo_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: VehicleId::new("veh_001"),
            brand: "Toyota".into(),
            model: "Corolla".into(),
            year: 2020,
            plate: "ABC-1234".into(),
            color: "Gris Métal".into(),
            fuel_type: FuelType::Gasoline,
            status: VehicleStatus::Excellent,
            last_service: date(2024, 1, 15),
            next_service: date(2024, 7, 15),
            mileage_km: 45_000,
        },
        Vehicle {
            id: VehicleId::new("veh_002"),
            brand: "Renault".into(),
            model: "Duster".into(),
            year: 2019,
            plate: "DEF-5678".into(),
            color: "Blanc".into(),
            fuel_type: FuelType::Diesel,
            status: VehicleStatus::Good,
            last_service: date(2024, 2, 20),
            next_service: date(2024, 8, 20),
            mileage_km: 75_000,
        },
    ]
}

fn demo_missions() -> Vec<Mission> {
    vec![
        Mission {
            id: MissionId::new("miss_001"),
            service: ServiceType::Tire,
            client: "Dr. Sarr".into(),
            vehicle: "Toyota Hilux".into(),
            location: "Dakar, Plateau".into(),
            status: MissionStatus::Completed,
            price_cfa: 8_000,
            duration_min: Some(45),
            rating: Some(5),
        },
        Mission {
            id: MissionId::new("miss_002"),
            service: ServiceType::Battery,
            client: "Mme. Diop".into(),
            vehicle: "Renault Clio".into(),
            location: "Ouakam".into(),
            status: MissionStatus::Pending,
            price_cfa: 20_000,
            duration_min: None,
            rating: None,
        },
        Mission {
            id: MissionId::new("miss_003"),
            service: ServiceType::Engine,
            client: "M. Ndiaye".into(),
            vehicle: "Mercedes C200".into(),
            location: "Mermoz".into(),
            status: MissionStatus::Pending,
            price_cfa: 15_000,
            duration_min: None,
            rating: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    mod service_type_tests {
        use super::*;

        #[test]
        fn test_estimate_table() {
            assert_eq!(ServiceType::Tire.estimate().cost_cfa, 4_500);
            assert_eq!(ServiceType::Battery.estimate().cost_cfa, 20_000);
            assert_eq!(ServiceType::Engine.estimate().cost_cfa, 15_000);
            assert_eq!(ServiceType::Fuel.estimate().cost_cfa, 15_000);
            assert_eq!(ServiceType::Towing.estimate().cost_cfa, 15_000);
            assert_eq!(ServiceType::Other.estimate().cost_cfa, 15_000);
        }

        #[test]
        fn test_estimate_minutes_are_uniform() {
            for service in ServiceType::ALL {
                assert_eq!(service.estimate().minutes, 30);
            }
        }

        #[test]
        fn test_from_str_aliases() {
            assert_eq!(ServiceType::from_str("tire"), Some(ServiceType::Tire));
            assert_eq!(ServiceType::from_str("Pneu"), Some(ServiceType::Tire));
            assert_eq!(ServiceType::from_str("BATTERY"), Some(ServiceType::Battery));
            assert_eq!(ServiceType::from_str("remorquage"), Some(ServiceType::Towing));
            assert_eq!(ServiceType::from_str("unknown"), None);
        }
    }

    mod request_status_tests {
        use super::*;

        #[test]
        fn test_happy_path_chain() {
            assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Assigned));
            assert!(RequestStatus::Assigned.can_transition_to(RequestStatus::OnWay));
            assert!(RequestStatus::OnWay.can_transition_to(RequestStatus::InProgress));
            assert!(RequestStatus::InProgress.can_transition_to(RequestStatus::Completed));
        }

        #[test]
        fn test_cancel_reachable_from_every_live_status() {
            for status in [
                RequestStatus::Pending,
                RequestStatus::Assigned,
                RequestStatus::OnWay,
                RequestStatus::InProgress,
            ] {
                assert!(status.can_transition_to(RequestStatus::Cancelled), "{status}");
            }
        }

        #[test]
        fn test_no_skipping_states() {
            assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::InProgress));
            assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Completed));
            assert!(!RequestStatus::Assigned.can_transition_to(RequestStatus::Completed));
        }

        #[test]
        fn test_terminal_states_have_no_exits() {
            assert!(RequestStatus::Completed.valid_transitions().is_empty());
            assert!(RequestStatus::Cancelled.valid_transitions().is_empty());
            assert!(matches!(
                RequestStatus::Cancelled.validate_transition(RequestStatus::Pending),
                Err(TransitionError::FromTerminal { .. })
            ));
        }

        #[test]
        fn test_same_status_rejected() {
            assert!(matches!(
                RequestStatus::Pending.validate_transition(RequestStatus::Pending),
                Err(TransitionError::SameStatus)
            ));
        }

        #[test]
        fn test_from_str_aliases() {
            assert_eq!(RequestStatus::from_str("on_way"), Some(RequestStatus::OnWay));
            assert_eq!(RequestStatus::from_str("en_route"), Some(RequestStatus::OnWay));
            assert_eq!(
                RequestStatus::from_str("canceled"),
                Some(RequestStatus::Cancelled)
            );
            assert_eq!(RequestStatus::from_str(""), None);
        }
    }

    mod mission_status_tests {
        use super::*;

        #[test]
        fn test_accept_only_from_pending() {
            assert!(MissionStatus::Pending.can_transition_to(MissionStatus::Accepted));
            assert!(!MissionStatus::Completed.can_transition_to(MissionStatus::Accepted));
            assert!(!MissionStatus::Cancelled.can_transition_to(MissionStatus::Accepted));
        }

        #[test]
        fn test_legacy_in_progress_spelling() {
            assert_eq!(
                MissionStatus::from_str("in_progress"),
                Some(MissionStatus::Accepted)
            );
            let parsed: MissionStatus =
                serde_json::from_str("\"in_progress\"").expect("legacy alias");
            assert_eq!(parsed, MissionStatus::Accepted);
        }

        #[test]
        fn test_terminal_states() {
            assert!(MissionStatus::Completed.is_terminal());
            assert!(MissionStatus::Cancelled.is_terminal());
            assert!(!MissionStatus::Accepted.is_terminal());
            assert!(MissionStatus::Pending.is_acceptable());
            assert!(!MissionStatus::Accepted.is_acceptable());
        }
    }

    mod request_tests {
        use super::*;

        #[test]
        fn test_new_request_defaults() {
            let request = ServiceRequest::new(ServiceType::Tire);
            assert_eq!(request.status, RequestStatus::Pending);
            assert_eq!(request.estimated_cost_cfa, 4_500);
            assert_eq!(request.estimated_minutes, 30);
            assert_eq!(request.location, "Dakar, Plateau");
            assert!(request.assigned_mechanic.is_none());
        }

        #[test]
        fn test_assign_attaches_mechanic() {
            let mut request = ServiceRequest::new(ServiceType::Battery);
            let mechanic = Mechanic {
                id: MechanicId::new("mec_001"),
                name: "Moussa B.".into(),
                rating: 4.9,
                jobs_completed: 124,
                specialties: vec!["Engine".into()],
                location: "Dakar".into(),
                available: true,
                response_time_min: 8,
            };
            request.assign(mechanic).expect("pending -> assigned");
            assert_eq!(request.status, RequestStatus::Assigned);
            assert!(request.assigned_mechanic.is_some());
        }

        #[test]
        fn test_invalid_transition_leaves_request_untouched() {
            let mut request = ServiceRequest::new(ServiceType::Engine);
            let err = request.transition(RequestStatus::Completed);
            assert!(err.is_err());
            assert_eq!(request.status, RequestStatus::Pending);
        }
    }

    mod vehicle_tests {
        use super::*;

        fn payload() -> NewVehicle {
            NewVehicle {
                brand: "Peugeot".into(),
                model: "208".into(),
                year: 2021,
                plate: "gh-9012".into(),
                color: "Rouge".into(),
                fuel_type: FuelType::Gasoline,
            }
        }

        #[test]
        fn test_validate_requires_brand_model_plate() {
            let mut p = payload();
            p.brand = "  ".into();
            assert!(matches!(
                p.validate(),
                Err(VehicleValidationError::MissingField { field: "marque" })
            ));

            let mut p = payload();
            p.plate = String::new();
            assert!(matches!(
                p.validate(),
                Err(VehicleValidationError::MissingField {
                    field: "immatriculation"
                })
            ));

            assert!(payload().validate().is_ok());
        }

        #[test]
        fn test_register_defaults() {
            let today = date(2024, 3, 1);
            let vehicle = Vehicle::register(payload(), today);
            assert_eq!(vehicle.status, VehicleStatus::Good);
            assert_eq!(vehicle.mileage_km, 0);
            assert_eq!(vehicle.last_service, today);
            assert_eq!(vehicle.next_service, date(2024, 9, 1));
            assert_eq!(vehicle.plate, "GH-9012");
        }
    }

    mod earnings_tests {
        use super::*;

        #[test]
        fn test_payout_moves_today_and_total_only() {
            let mut earnings = Earnings {
                today_cfa: 24_500,
                week_cfa: 89_000,
                month_cfa: 345_000,
                total_cfa: 1_245_000,
            };
            earnings.record_payout(8_000);
            assert_eq!(earnings.today_cfa, 32_500);
            assert_eq!(earnings.total_cfa, 1_253_000);
            assert_eq!(earnings.week_cfa, 89_000);
            assert_eq!(earnings.month_cfa, 345_000);
        }
    }

    mod model_tests {
        use super::*;

        #[test]
        fn test_default_seed_is_consistent() {
            let model = Model::default();
            assert_eq!(model.vehicles.len(), 2);
            assert_eq!(model.missions.len(), 3);
            assert_eq!(model.pending_mission_count(), 2);
            assert!(model.active_mission().is_none());
            assert!(!model.has_live_request());
            assert_eq!(model.stats.completed, 124);
            assert_eq!(model.earnings.today_cfa, 24_500);
            assert!(model.online);
        }

        #[test]
        fn test_profile_update_skips_blank_fields() {
            let mut profile = demo_profile();
            let update = ProfileUpdate {
                name: Some("  ".into()),
                email: Some("nouveau@example.com".into()),
                phone: None,
            };
            update.apply(&mut profile);
            assert_eq!(profile.name, "Jean Dupont");
            assert_eq!(profile.email, "nouveau@example.com");
            assert_eq!(profile.phone, "+229 01 23 45 67");
        }
    }
}
