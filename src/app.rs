use chrono::Utc;
use tracing::{debug, warn};

use crate::capabilities::{Capabilities, DiagnosisQuery};
use crate::event::Event;
use crate::model::{DashboardTab, MissionStatus, Model, RequestStatus, ServiceRequest, Vehicle};
use crate::view::{self, ViewModel};
use crate::{AppError, ErrorKind};

#[derive(Default)]
pub struct App;

impl App {
    fn transition_active_request(model: &mut Model, next: RequestStatus) -> bool {
        let Some(request) = model.active_request.as_mut() else {
            debug!(
                status = next.as_str(),
                "request transition ignored: no active request"
            );
            return false;
        };

        match request.transition(next) {
            Ok(()) => {
                debug!(
                    request_id = %request.id,
                    status = next.as_str(),
                    "request transitioned"
                );
                if next.is_terminal() {
                    model.active_request = None;
                }
            }
            Err(e) => {
                warn!(status = next.as_str(), error = %e, "request transition rejected");
                model.set_error(e.into());
            }
        }
        true
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(event = event.name(), "handling event");

        match event {
            Event::Noop => {}

            Event::TabSelected { tab } => {
                model.tab = tab;
                caps.render.render();
            }

            Event::CreateRequestRequested { service } => {
                if model.has_live_request() {
                    warn!(
                        service = service.as_str(),
                        "create request rejected: a request is already in flight"
                    );
                    model.set_error(
                        AppError::new(
                            ErrorKind::InvalidTransition,
                            "Une demande d'assistance est déjà en cours.",
                        )
                        .with_context("service", service.as_str()),
                    );
                    caps.render.render();
                    return;
                }

                let request = ServiceRequest::new(service);
                debug!(
                    request_id = %request.id,
                    service = service.as_str(),
                    cost_cfa = request.estimated_cost_cfa,
                    "service request created"
                );
                model.active_request = Some(request);
                model.tab = DashboardTab::Tracking;
                caps.render.render();
            }

            Event::MechanicAssigned { mechanic } => {
                let Some(request) = model.active_request.as_mut() else {
                    debug!("assignment ignored: no active request");
                    return;
                };
                match request.assign(mechanic) {
                    Ok(()) => {
                        debug!(request_id = %request.id, "mechanic assigned");
                    }
                    Err(e) => {
                        warn!(error = %e, "assignment rejected");
                        model.set_error(e.into());
                    }
                }
                caps.render.render();
            }

            Event::RequestTransitionRequested { next } => {
                if Self::transition_active_request(model, next) {
                    caps.render.render();
                }
            }

            Event::CompleteRequestRequested => {
                if Self::transition_active_request(model, RequestStatus::Completed) {
                    caps.render.render();
                }
            }

            Event::CancelRequestRequested => {
                if Self::transition_active_request(model, RequestStatus::Cancelled) {
                    caps.render.render();
                }
            }

            Event::AddVehicleRequested(payload) => {
                match payload.validate() {
                    Ok(()) => {
                        let vehicle = Vehicle::register(payload, Utc::now().date_naive());
                        debug!(vehicle_id = %vehicle.id, plate = %vehicle.plate, "vehicle added");
                        model.vehicles.push(vehicle);
                    }
                    Err(e) => {
                        warn!(error = %e, "vehicle rejected");
                        model.set_error(e.into());
                    }
                }
                caps.render.render();
            }

            Event::UpdateProfileRequested(update) => {
                update.apply(&mut model.profile);
                caps.render.render();
            }

            Event::DiagnosisRequested { symptoms } => {
                let symptoms = symptoms.trim().to_string();
                if symptoms.is_empty() {
                    debug!("diagnosis ignored: empty symptom description");
                    return;
                }

                model.is_analyzing = true;
                caps.advisor.diagnose(DiagnosisQuery::new(symptoms), |result| {
                    Event::DiagnosisReceived(Box::new(result))
                });
                caps.render.render();
            }

            Event::DiagnosisReceived(result) => {
                model.is_analyzing = false;
                match *result {
                    Ok(diagnosis) => {
                        debug!(issue = %diagnosis.issue_title, "diagnosis received");
                        model.diagnosis = Some(diagnosis);
                    }
                    Err(e) => {
                        // A failed run clears the previous record as well.
                        warn!(error = %e, "diagnosis failed");
                        model.diagnosis = None;
                    }
                }
                caps.render.render();
            }

            Event::ClearDiagnosis => {
                model.diagnosis = None;
                caps.render.render();
            }

            Event::AvailabilityChanged { online } => {
                model.online = online;
                debug!(online, "availability changed");
                caps.render.render();
            }

            Event::AcceptMissionRequested { mission_id } => {
                if !model.online {
                    warn!(mission_id = %mission_id, "accept rejected: mechanic offline");
                    model.set_error(AppError::new(
                        ErrorKind::Unavailable,
                        "mechanic is offline",
                    ));
                    caps.render.render();
                    return;
                }

                if let Some(active) = model.active_mission() {
                    warn!(
                        mission_id = %mission_id,
                        active_mission = %active.id,
                        "accept rejected: another mission is in progress"
                    );
                    model.set_error(
                        AppError::new(
                            ErrorKind::InvalidTransition,
                            "Une mission est déjà en cours.",
                        )
                        .with_context("active_mission", active.id.as_str()),
                    );
                    caps.render.render();
                    return;
                }

                let Some(mission) = model.mission_mut(&mission_id) else {
                    debug!(mission_id = %mission_id, "accept ignored: unknown mission");
                    return;
                };
                match mission.transition(MissionStatus::Accepted) {
                    Ok(()) => {
                        debug!(mission_id = %mission_id, "mission accepted");
                        model.active_mission_id = Some(mission_id);
                    }
                    Err(e) => {
                        warn!(mission_id = %mission_id, error = %e, "accept rejected");
                        model.set_error(e.into());
                    }
                }
                caps.render.render();
            }

            Event::CompleteMissionRequested => {
                let Some(id) = model.active_mission_id.clone() else {
                    debug!("mission completion ignored: no active mission");
                    return;
                };

                let outcome = model
                    .mission_mut(&id)
                    .map(|m| m.transition(MissionStatus::Completed).map(|()| m.price_cfa));
                match outcome {
                    Some(Ok(price_cfa)) => {
                        model.stats.record_completion();
                        model.earnings.record_payout(price_cfa);
                        model.active_mission_id = None;
                        debug!(mission_id = %id, amount_cfa = price_cfa, "mission completed");
                    }
                    Some(Err(e)) => {
                        warn!(mission_id = %id, error = %e, "mission completion rejected");
                        model.set_error(e.into());
                    }
                    None => {
                        warn!(mission_id = %id, "active mission missing from board");
                        model.active_mission_id = None;
                    }
                }
                caps.render.render();
            }

            Event::CancelMissionRequested => {
                let Some(id) = model.active_mission_id.take() else {
                    debug!("mission cancel ignored: no active mission");
                    return;
                };
                if let Some(mission) = model.mission_mut(&id) {
                    if let Err(e) = mission.transition(MissionStatus::Cancelled) {
                        warn!(mission_id = %id, error = %e, "mission cancel rejected");
                    }
                }
                debug!(mission_id = %id, "mission cancelled");
                caps.render.render();
            }

            Event::DismissError => {
                model.clear_error();
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        view::snapshot(model)
    }
}
