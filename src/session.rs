//! Client session controller — the SPA's page-navigation state machine.
//!
//! Pure in-memory state: which screen is shown and which identity is
//! logged in. There is no token and no persistence; the state resets
//! when the app reloads. Transitions fire only on explicit user
//! actions, and login submission moves unconditionally to the matching
//! dashboard (the API echoes the identity back on success).

use serde::{Deserialize, Serialize};

/// Screens the portal can show. Placeholder screens exist in the
/// navigation menus but have no implementation yet; navigating to one
/// keeps the user on their active dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Landing,
    PatientLogin,
    MedicalLogin,
    PatientDashboard,
    MedicalDashboard,
    Upload,
    History,
    Emergency,
    Settings,
    MedicalInfo,
    UpdateHistory,
    Patients,
}

impl Page {
    pub fn is_placeholder(self) -> bool {
        matches!(
            self,
            Page::Settings | Page::MedicalInfo | Page::UpdateHistory | Page::Patients
        )
    }
}

/// Which role is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Patient,
    Medical,
}

/// Identity payload held for a logged-in patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientData {
    pub aadhaar_number: String,
    pub patient_name: String,
}

/// Identity payload held for a logged-in medical authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalData {
    pub email: String,
}

/// User actions that drive navigation.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    OpenPatientLogin,
    OpenMedicalLogin,
    PatientLoggedIn {
        aadhaar_number: String,
        patient_name: String,
    },
    MedicalLoggedIn {
        email: String,
    },
    Navigate(Page),
    BackToDashboard,
    BackToLanding,
    Logout,
}

/// The full client-side session: current screen plus logged-in identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub current_page: Page,
    pub user_type: Option<UserType>,
    pub patient_data: Option<PatientData>,
    pub medical_data: Option<MedicalData>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session: landing page, nobody logged in.
    pub fn new() -> Self {
        Self {
            current_page: Page::Landing,
            user_type: None,
            patient_data: None,
            medical_data: None,
        }
    }

    /// The dashboard for the logged-in role, if any.
    pub fn dashboard(&self) -> Option<Page> {
        match self.user_type {
            Some(UserType::Patient) => Some(Page::PatientDashboard),
            Some(UserType::Medical) => Some(Page::MedicalDashboard),
            None => None,
        }
    }

    /// Apply a user action to the session.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::OpenPatientLogin => {
                self.current_page = Page::PatientLogin;
            }
            SessionEvent::OpenMedicalLogin => {
                self.current_page = Page::MedicalLogin;
            }
            SessionEvent::PatientLoggedIn {
                aadhaar_number,
                patient_name,
            } => {
                self.patient_data = Some(PatientData {
                    aadhaar_number,
                    patient_name,
                });
                self.user_type = Some(UserType::Patient);
                self.current_page = Page::PatientDashboard;
            }
            SessionEvent::MedicalLoggedIn { email } => {
                self.medical_data = Some(MedicalData { email });
                self.user_type = Some(UserType::Medical);
                self.current_page = Page::MedicalDashboard;
            }
            SessionEvent::Navigate(page) => {
                if page.is_placeholder() {
                    // Unimplemented screen: stay on the active dashboard
                    if let Some(dashboard) = self.dashboard() {
                        self.current_page = dashboard;
                    }
                } else {
                    self.current_page = page;
                }
            }
            SessionEvent::BackToDashboard => {
                if let Some(dashboard) = self.dashboard() {
                    self.current_page = dashboard;
                }
            }
            SessionEvent::BackToLanding => {
                self.current_page = Page::Landing;
            }
            SessionEvent::Logout => {
                self.patient_data = None;
                self.medical_data = None;
                self.user_type = None;
                self.current_page = Page::Landing;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in_patient() -> Session {
        let mut session = Session::new();
        session.apply(SessionEvent::OpenPatientLogin);
        session.apply(SessionEvent::PatientLoggedIn {
            aadhaar_number: "123456789012".into(),
            patient_name: "Asha Rao".into(),
        });
        session
    }

    fn logged_in_medical() -> Session {
        let mut session = Session::new();
        session.apply(SessionEvent::OpenMedicalLogin);
        session.apply(SessionEvent::MedicalLoggedIn {
            email: "dr@hospital.in".into(),
        });
        session
    }

    #[test]
    fn initial_state_is_landing_with_no_identity() {
        let session = Session::new();
        assert_eq!(session.current_page, Page::Landing);
        assert_eq!(session.user_type, None);
        assert!(session.patient_data.is_none());
        assert!(session.medical_data.is_none());
    }

    #[test]
    fn patient_login_reaches_patient_dashboard() {
        let session = logged_in_patient();
        assert_eq!(session.current_page, Page::PatientDashboard);
        assert_eq!(session.user_type, Some(UserType::Patient));
        assert_eq!(
            session.patient_data.as_ref().unwrap().patient_name,
            "Asha Rao"
        );
    }

    #[test]
    fn medical_login_reaches_medical_dashboard() {
        let session = logged_in_medical();
        assert_eq!(session.current_page, Page::MedicalDashboard);
        assert_eq!(session.user_type, Some(UserType::Medical));
        assert_eq!(
            session.medical_data.as_ref().unwrap().email,
            "dr@hospital.in"
        );
    }

    #[test]
    fn logout_resets_to_landing_from_any_dashboard() {
        for mut session in [logged_in_patient(), logged_in_medical()] {
            session.apply(SessionEvent::Logout);
            assert_eq!(session.current_page, Page::Landing);
            assert_eq!(session.user_type, None);
            assert!(session.patient_data.is_none());
            assert!(session.medical_data.is_none());
        }
    }

    #[test]
    fn placeholder_page_redirects_to_patient_dashboard() {
        let mut session = logged_in_patient();
        session.apply(SessionEvent::Navigate(Page::Settings));
        assert_eq!(session.current_page, Page::PatientDashboard);
    }

    #[test]
    fn placeholder_page_redirects_to_medical_dashboard() {
        let mut session = logged_in_medical();
        for page in [Page::Patients, Page::UpdateHistory, Page::MedicalInfo] {
            session.apply(SessionEvent::Navigate(page));
            assert_eq!(session.current_page, Page::MedicalDashboard);
        }
    }

    #[test]
    fn placeholder_without_identity_stays_put() {
        let mut session = Session::new();
        session.apply(SessionEvent::Navigate(Page::Settings));
        assert_eq!(session.current_page, Page::Landing);
    }

    #[test]
    fn implemented_pages_navigate_directly() {
        let mut session = logged_in_patient();
        for page in [Page::Upload, Page::History, Page::Emergency] {
            session.apply(SessionEvent::Navigate(page));
            assert_eq!(session.current_page, page);
        }
    }

    #[test]
    fn back_to_dashboard_returns_to_active_role() {
        let mut session = logged_in_patient();
        session.apply(SessionEvent::Navigate(Page::Upload));
        session.apply(SessionEvent::BackToDashboard);
        assert_eq!(session.current_page, Page::PatientDashboard);
    }

    #[test]
    fn back_to_landing_keeps_identity() {
        let mut session = logged_in_patient();
        session.apply(SessionEvent::BackToLanding);
        assert_eq!(session.current_page, Page::Landing);
        // Back is navigation, not logout
        assert_eq!(session.user_type, Some(UserType::Patient));
    }

    #[test]
    fn login_pages_open_from_landing() {
        let mut session = Session::new();
        session.apply(SessionEvent::OpenPatientLogin);
        assert_eq!(session.current_page, Page::PatientLogin);

        let mut session = Session::new();
        session.apply(SessionEvent::OpenMedicalLogin);
        assert_eq!(session.current_page, Page::MedicalLogin);
    }

    #[test]
    fn page_names_serialize_kebab_case() {
        assert_eq!(
            serde_json::to_value(Page::PatientDashboard).unwrap(),
            "patient-dashboard"
        );
        assert_eq!(serde_json::to_value(Page::Landing).unwrap(), "landing");
        assert_eq!(
            serde_json::to_value(UserType::Patient).unwrap(),
            "patient"
        );
    }
}
