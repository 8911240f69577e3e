use serde::{Deserialize, Serialize};

use crate::capabilities::Diagnosis;
use crate::model::{
    DashboardTab, Mission, MissionStatus, Model, RequestStatus, ServiceRequest, Vehicle,
};
use crate::AppError;

/// Groups an integer CFA amount the way the product prints money: `24.500F`.
#[must_use]
pub fn format_cfa(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out.push('F');
    out
}

#[must_use]
pub fn format_minutes(minutes: u32) -> String {
    format!("{minutes} min")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subscription_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleView {
    pub id: String,
    pub name: String,
    pub year: u16,
    pub plate: String,
    pub color: String,
    pub fuel_label: String,
    pub status_label: String,
    pub mileage_km: u32,
    pub next_service: String,
}

impl VehicleView {
    fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.0.clone(),
            name: vehicle.display_name(),
            year: vehicle.year,
            plate: vehicle.plate.clone(),
            color: vehicle.color.clone(),
            fuel_label: vehicle.fuel_type.display_name().to_string(),
            status_label: vehicle.status.display_name().to_string(),
            mileage_km: vehicle.mileage_km,
            next_service: vehicle.next_service.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechanicView {
    pub name: String,
    pub rating_text: String,
    pub response_time_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestView {
    pub id: String,
    pub service_label: String,
    pub status: RequestStatus,
    pub status_label: String,
    pub location: String,
    pub estimated_cost_text: String,
    pub estimated_time_text: String,
    pub mechanic: Option<MechanicView>,
    pub can_cancel: bool,
    pub can_complete: bool,
}

impl RequestView {
    fn from_request(request: &ServiceRequest) -> Self {
        Self {
            id: request.id.0.clone(),
            service_label: request.service.display_name().to_string(),
            status: request.status,
            status_label: request.status.display_name().to_string(),
            location: request.location.clone(),
            estimated_cost_text: format_cfa(request.estimated_cost_cfa),
            estimated_time_text: format_minutes(request.estimated_minutes),
            mechanic: request.assigned_mechanic.as_ref().map(|m| MechanicView {
                name: m.name.clone(),
                rating_text: format!("{:.1}", m.rating),
                response_time_text: format_minutes(m.response_time_min),
            }),
            can_cancel: !request.status.is_terminal(),
            can_complete: request.status == RequestStatus::InProgress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionView {
    pub id: String,
    pub service_label: String,
    pub client: String,
    pub vehicle: String,
    pub location: String,
    pub status: MissionStatus,
    pub status_label: String,
    pub price_text: String,
    pub duration_min: Option<u32>,
    pub rating: Option<u8>,
    pub can_accept: bool,
}

impl MissionView {
    fn from_mission(mission: &Mission, can_accept: bool) -> Self {
        Self {
            id: mission.id.0.clone(),
            service_label: mission.service.display_name().to_string(),
            client: mission.client.clone(),
            vehicle: mission.vehicle.clone(),
            location: mission.location.clone(),
            status: mission.status,
            status_label: mission.status.display_name().to_string(),
            price_text: format_cfa(mission.price_cfa),
            duration_min: mission.duration_min,
            rating: mission.rating,
            can_accept,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsView {
    pub completed: u32,
    pub rating: f32,
    pub response_time_text: String,
    pub satisfaction_pct: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsView {
    pub today_text: String,
    pub week_text: String,
    pub month_text: String,
    pub total_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicPanel {
    pub online: bool,
    pub stats: StatsView,
    pub earnings: EarningsView,
    pub missions: Vec<MissionView>,
    pub active_mission: Option<MissionView>,
    pub pending_mission_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFacingError {
    pub code: String,
    pub message: String,
    pub is_retryable: bool,
}

impl From<&AppError> for UserFacingError {
    fn from(error: &AppError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.user_facing_message(),
            is_retryable: error.is_retryable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub tab: DashboardTab,
    pub profile: ProfileView,
    pub vehicles: Vec<VehicleView>,
    pub active_request: Option<RequestView>,
    pub diagnosis: Option<Diagnosis>,
    pub is_analyzing: bool,
    pub mechanic: MechanicPanel,
    pub error: Option<UserFacingError>,
}

#[must_use]
pub fn snapshot(model: &Model) -> ViewModel {
    let accept_open = model.online && model.active_mission_id.is_none();

    let missions = model
        .missions
        .iter()
        .map(|m| MissionView::from_mission(m, accept_open && m.status.is_acceptable()))
        .collect();

    ViewModel {
        tab: model.tab,
        profile: ProfileView {
            name: model.profile.name.clone(),
            email: model.profile.email.clone(),
            phone: model.profile.phone.clone(),
            subscription_label: model.profile.subscription.display_name().to_string(),
        },
        vehicles: model.vehicles.iter().map(VehicleView::from_vehicle).collect(),
        active_request: model.active_request.as_ref().map(RequestView::from_request),
        diagnosis: model.diagnosis.clone(),
        is_analyzing: model.is_analyzing,
        mechanic: MechanicPanel {
            online: model.online,
            stats: StatsView {
                completed: model.stats.completed,
                rating: model.stats.rating,
                response_time_text: format_minutes(model.stats.response_time_min),
                satisfaction_pct: model.stats.satisfaction_pct,
            },
            earnings: EarningsView {
                today_text: format_cfa(model.earnings.today_cfa),
                week_text: format_cfa(model.earnings.week_cfa),
                month_text: format_cfa(model.earnings.month_cfa),
                total_text: format_cfa(model.earnings.total_cfa),
            },
            missions,
            active_mission: model
                .active_mission()
                .map(|m| MissionView::from_mission(m, false)),
            pending_mission_count: model.pending_mission_count(),
        },
        error: model.active_error.as_ref().map(UserFacingError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ServiceType, SubscriptionTier};

    mod format_tests {
        use super::*;

        #[test]
        fn test_format_cfa_grouping() {
            assert_eq!(format_cfa(0), "0F");
            assert_eq!(format_cfa(500), "500F");
            assert_eq!(format_cfa(4_500), "4.500F");
            assert_eq!(format_cfa(24_500), "24.500F");
            assert_eq!(format_cfa(345_000), "345.000F");
            assert_eq!(format_cfa(1_245_000), "1.245.000F");
        }

        #[test]
        fn test_format_minutes() {
            assert_eq!(format_minutes(30), "30 min");
            assert_eq!(format_minutes(8), "8 min");
        }
    }

    mod snapshot_tests {
        use super::*;

        #[test]
        fn test_seed_snapshot() {
            let model = Model::default();
            let vm = snapshot(&model);

            assert_eq!(vm.tab, DashboardTab::Dashboard);
            assert_eq!(vm.profile.name, "Jean Dupont");
            assert_eq!(vm.profile.subscription_label, "GOLD");
            assert_eq!(vm.vehicles.len(), 2);
            assert!(vm.active_request.is_none());
            assert_eq!(vm.mechanic.earnings.today_text, "24.500F");
            assert_eq!(vm.mechanic.earnings.total_text, "1.245.000F");
            assert_eq!(vm.mechanic.pending_mission_count, 2);
            assert!(vm.error.is_none());
        }

        #[test]
        fn test_request_card_affordances() {
            let mut model = Model::default();
            model.active_request = Some(crate::model::ServiceRequest::new(ServiceType::Tire));

            let vm = snapshot(&model);
            let card = vm.active_request.expect("request card");
            assert_eq!(card.service_label, "Pneu crevé");
            assert_eq!(card.estimated_cost_text, "4.500F");
            assert_eq!(card.estimated_time_text, "30 min");
            assert!(card.can_cancel);
            assert!(!card.can_complete);
        }

        #[test]
        fn test_accept_affordance_follows_availability() {
            let mut model = Model::default();
            let vm = snapshot(&model);
            assert!(vm
                .mechanic
                .missions
                .iter()
                .filter(|m| m.status == MissionStatus::Pending)
                .all(|m| m.can_accept));

            model.online = false;
            let vm = snapshot(&model);
            assert!(vm.mechanic.missions.iter().all(|m| !m.can_accept));
        }

        #[test]
        fn test_gold_badge_label() {
            assert_eq!(SubscriptionTier::Gold.display_name(), "GOLD");
        }
    }
}
