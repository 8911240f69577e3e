use crate::capabilities::AdvisorResult;
use crate::model::{DashboardTab, Mechanic, MissionId, NewVehicle, ProfileUpdate, RequestStatus, ServiceType};

#[derive(Debug, Clone)]
pub enum Event {
    Noop,

    TabSelected {
        tab: DashboardTab,
    },

    CreateRequestRequested {
        service: ServiceType,
    },
    MechanicAssigned {
        mechanic: Mechanic,
    },
    RequestTransitionRequested {
        next: RequestStatus,
    },
    CompleteRequestRequested,
    CancelRequestRequested,

    AddVehicleRequested(NewVehicle),
    UpdateProfileRequested(ProfileUpdate),

    DiagnosisRequested {
        symptoms: String,
    },
    DiagnosisReceived(Box<AdvisorResult>),
    ClearDiagnosis,

    AvailabilityChanged {
        online: bool,
    },
    AcceptMissionRequested {
        mission_id: MissionId,
    },
    CompleteMissionRequested,
    CancelMissionRequested,

    DismissError,
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::TabSelected { .. } => "tab_selected",
            Self::CreateRequestRequested { .. } => "create_request_requested",
            Self::MechanicAssigned { .. } => "mechanic_assigned",
            Self::RequestTransitionRequested { .. } => "request_transition_requested",
            Self::CompleteRequestRequested => "complete_request_requested",
            Self::CancelRequestRequested => "cancel_request_requested",
            Self::AddVehicleRequested(_) => "add_vehicle_requested",
            Self::UpdateProfileRequested(_) => "update_profile_requested",
            Self::DiagnosisRequested { .. } => "diagnosis_requested",
            Self::DiagnosisReceived(_) => "diagnosis_received",
            Self::ClearDiagnosis => "clear_diagnosis",
            Self::AvailabilityChanged { .. } => "availability_changed",
            Self::AcceptMissionRequested { .. } => "accept_mission_requested",
            Self::CompleteMissionRequested => "complete_mission_requested",
            Self::CancelMissionRequested => "cancel_mission_requested",
            Self::DismissError => "dismiss_error",
        }
    }

    /// Events triggered by a person tapping something, as opposed to results
    /// coming back from the shell.
    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Self::Noop | Self::MechanicAssigned { .. } | Self::DiagnosisReceived(_)
        )
    }
}
