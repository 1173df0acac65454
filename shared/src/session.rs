//! Page session: which business and calendar are selected and the
//! availability currently displayed.

use crate::availability::AvailabilityPayload;
use crate::error::BookingError;

pub const DEFAULT_CALENDAR_ID: u32 = 1;

/// Business/calendar pair a load was started for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTarget {
    pub business_id: String,
    pub calendar_id: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingSession {
    business_id: String,
    calendar_id: Option<u32>,
    availability: Option<AvailabilityPayload>,
    /// Business/calendar the current `availability` belongs to
    loaded: Option<LoadTarget>,
    pending: Option<LoadTarget>,
    loading: bool,
}

impl BookingSession {
    pub fn new(business_id: impl Into<String>, calendar_id: Option<u32>) -> Self {
        Self {
            business_id: business_id.into(),
            calendar_id,
            ..Self::default()
        }
    }

    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    pub fn calendar_id(&self) -> Option<u32> {
        self.calendar_id
    }

    pub fn availability(&self) -> Option<&AvailabilityPayload> {
        self.availability.as_ref()
    }

    /// Business/calendar of the availability on screen. Reservations and
    /// reloads go here, whatever has been typed since.
    pub fn loaded_target(&self) -> Option<&LoadTarget> {
        self.loaded.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn select_business(&mut self, business_id: impl Into<String>) {
        self.business_id = business_id.into().trim().to_string();
    }

    pub fn select_calendar(&mut self, calendar_id: Option<u32>) {
        self.calendar_id = calendar_id;
    }

    /// Start a load of the selected calendar. Missing IDs are rejected
    /// before any request.
    pub fn begin_load(&mut self) -> Result<LoadTarget, BookingError> {
        let business_id = self.business_id.trim().to_string();
        match (business_id.is_empty(), self.calendar_id) {
            (false, Some(calendar_id)) => Ok(self.start(LoadTarget { business_id, calendar_id })),
            _ => Err(BookingError::validation(
                "Verifique el ID del negocio y seleccione un calendario.",
            )),
        }
    }

    /// Load the business/calendar on screen again, ignoring unsaved edits
    /// to the selection.
    pub fn begin_reload(&mut self) -> Result<LoadTarget, BookingError> {
        match self.loaded.clone() {
            Some(target) => Ok(self.start(target)),
            None => self.begin_load(),
        }
    }

    fn start(&mut self, target: LoadTarget) -> LoadTarget {
        self.loading = true;
        self.pending = Some(target.clone());
        target
    }

    /// Finish a load. The payload is replaced wholesale on success and the
    /// loading flag is cleared whatever the outcome.
    pub fn finish_load(
        &mut self,
        result: Result<AvailabilityPayload, BookingError>,
    ) -> Result<(), BookingError> {
        self.loading = false;
        let target = self.pending.take();
        let payload = result?;
        self.availability = Some(payload);
        self.loaded = target;
        Ok(())
    }
}

/// Calendar to select on page load: the `calendario` query parameter when
/// it names one of `available`, calendar 1 otherwise.
pub fn resolve_initial_calendar(url_param: Option<&str>, available: &[u32]) -> u32 {
    let Some(raw) = url_param.map(str::trim).filter(|p| !p.is_empty()) else {
        return DEFAULT_CALENDAR_ID;
    };

    match raw.parse::<u32>() {
        Ok(id) if available.contains(&id) => id,
        _ => {
            tracing::warn!(
                calendario = raw,
                "calendar from URL not among the options, using the default"
            );
            DEFAULT_CALENDAR_ID
        }
    }
}

/// Business ID from a `/reservas/{id}` page path
pub fn business_id_from_path(path: &str) -> Option<String> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some("reservas"), Some(id)) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::TimeBlock;

    #[test]
    fn test_begin_load_requires_ids() {
        let mut session = BookingSession::new("", Some(1));
        assert!(session.begin_load().unwrap_err().is_validation());
        assert!(!session.is_loading());

        let mut session = BookingSession::new("peluqueria", None);
        assert!(session.begin_load().unwrap_err().is_validation());

        let mut session = BookingSession::new("peluqueria", Some(2));
        let target = session.begin_load().unwrap();
        assert_eq!(
            target,
            LoadTarget { business_id: "peluqueria".to_string(), calendar_id: 2 }
        );
        assert!(session.is_loading());
    }

    #[test]
    fn test_finish_load_replaces_payload() {
        let mut session = BookingSession::new("peluqueria", Some(1));
        session.begin_load().unwrap();

        let mut first = AvailabilityPayload::default();
        first.dias.insert("2024-06-10".to_string(), vec![TimeBlock::new("10:00")]);
        session.finish_load(Ok(first)).unwrap();
        assert!(!session.is_loading());

        session.begin_load().unwrap();
        let second = AvailabilityPayload::default();
        session.finish_load(Ok(second.clone())).unwrap();
        assert_eq!(session.availability(), Some(&second));
    }

    #[test]
    fn test_failed_load_clears_loading_and_keeps_payload() {
        let mut session = BookingSession::new("peluqueria", Some(1));
        session.begin_load().unwrap();
        session.finish_load(Ok(AvailabilityPayload::default())).unwrap();

        session.begin_load().unwrap();
        let err = session
            .finish_load(Err(BookingError::NotFound("Calendario no encontrado.".into())))
            .unwrap_err();
        assert_eq!(err.user_message(), "Calendario no encontrado.");
        assert!(!session.is_loading());
        assert!(session.availability().is_some());
    }

    #[test]
    fn test_loaded_target_ignores_unsaved_edits() {
        let mut session = BookingSession::new("peluqueria", Some(2));
        assert_eq!(session.loaded_target(), None);

        let target = session.begin_load().unwrap();
        // Not on screen until the load succeeds
        assert_eq!(session.loaded_target(), None);
        session.finish_load(Ok(AvailabilityPayload::default())).unwrap();
        assert_eq!(session.loaded_target(), Some(&target));

        session.select_business("otro_negocio");
        session.select_calendar(Some(3));
        assert_eq!(session.loaded_target(), Some(&target));

        let reload = session.begin_reload().unwrap();
        assert_eq!(reload, target);
        assert!(session.is_loading());
        session.finish_load(Ok(AvailabilityPayload::default())).unwrap();
        assert_eq!(session.loaded_target().unwrap().business_id, "peluqueria");
        assert_eq!(session.business_id(), "otro_negocio");
    }

    #[test]
    fn test_failed_load_keeps_loaded_target() {
        let mut session = BookingSession::new("peluqueria", Some(1));
        session.begin_load().unwrap();
        session.finish_load(Ok(AvailabilityPayload::default())).unwrap();

        session.select_business("inexistente");
        session.begin_load().unwrap();
        session
            .finish_load(Err(BookingError::NotFound("Calendario no encontrado.".into())))
            .unwrap_err();
        assert_eq!(session.loaded_target().unwrap().business_id, "peluqueria");
    }

    #[test]
    fn test_reload_before_any_load_uses_selection() {
        let mut session = BookingSession::new("peluqueria", Some(1));
        assert_eq!(session.begin_reload().unwrap().business_id, "peluqueria");

        let mut session = BookingSession::new("", Some(1));
        assert!(session.begin_reload().unwrap_err().is_validation());
    }

    #[test]
    fn test_select_business_trims() {
        let mut session = BookingSession::default();
        session.select_business("  peluqueria ");
        session.select_calendar(Some(3));
        assert_eq!(session.business_id(), "peluqueria");
        assert_eq!(session.calendar_id(), Some(3));
    }

    #[test]
    fn test_resolve_initial_calendar() {
        let available = [1, 2, 3];
        assert_eq!(resolve_initial_calendar(None, &available), 1);
        assert_eq!(resolve_initial_calendar(Some("2"), &available), 2);
        assert_eq!(resolve_initial_calendar(Some("7"), &available), 1);
        assert_eq!(resolve_initial_calendar(Some("dos"), &available), 1);
        assert_eq!(resolve_initial_calendar(Some(""), &available), 1);
    }

    #[test]
    fn test_business_id_from_path() {
        assert_eq!(business_id_from_path("/reservas/peluqueria"), Some("peluqueria".to_string()));
        assert_eq!(business_id_from_path("/reservas/peluqueria/"), Some("peluqueria".to_string()));
        assert_eq!(business_id_from_path("/reservas/"), None);
        assert_eq!(business_id_from_path("/"), None);
        assert_eq!(business_id_from_path("/otra/cosa"), None);
    }
}
