//! Day detail panel controller.
//!
//! The panel is either closed or showing one day. While open it owns
//! exactly one dismiss listener and one refresh timer, both as RAII
//! handles created through [`PanelResources`]; dropping a handle removes
//! the listener or clears the timer.

use serde::{Deserialize, Serialize};

use crate::availability::DaySlot;

pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 1000;

/// Creates the browser resources tied to an open panel.
///
/// The returned handles must release their resource on drop.
pub trait PanelResources {
    type DismissListener;
    type RefreshTimer;

    fn listen_for_dismiss(&mut self) -> Self::DismissListener;
    fn start_refresh(&mut self, interval_ms: u32) -> Self::RefreshTimer;
}

/// Day shown by an open panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDetail {
    /// `YYYY-MM-DD`
    pub date_key: String,
    pub slots: Vec<DaySlot>,
}

impl DayDetail {
    pub fn new(date_key: impl Into<String>, slots: Vec<DaySlot>) -> Self {
        Self { date_key: date_key.into(), slots }
    }

    pub fn title(&self) -> String {
        format!("Horarios para el {}", self.date_key)
    }

    /// Slots paired with what clicking them does
    pub fn actions(&self) -> impl Iterator<Item = (&DaySlot, SlotAction)> {
        self.slots.iter().map(|s| (s, SlotAction::for_slot(s)))
    }
}

/// What a slot button in the panel does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    Reserved,
    Past,
    Bookable,
}

impl SlotAction {
    /// Reserved wins over past when both hold.
    pub fn for_slot(slot: &DaySlot) -> Self {
        if slot.is_reserved {
            SlotAction::Reserved
        } else if slot.is_past {
            SlotAction::Past
        } else {
            SlotAction::Bookable
        }
    }

    pub fn is_disabled(self) -> bool {
        !matches!(self, SlotAction::Bookable)
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotAction::Reserved => "Ya reservado",
            SlotAction::Past => "Hora ya pasada",
            SlotAction::Bookable => "Click para reservar",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            SlotAction::Reserved => "btn-hora btn-hora-reservada",
            SlotAction::Past => "btn-hora btn-hora-pasada",
            SlotAction::Bookable => "btn-hora",
        }
    }
}

/// Whether a document click should close the panel. Clicks on a calendar
/// day cell are ignored so the click that opens a panel cannot also close
/// it.
pub fn should_dismiss(is_open: bool, inside_panel: bool, on_day_cell: bool) -> bool {
    is_open && !inside_panel && !on_day_cell
}

enum PanelState<L, T> {
    Closed,
    Open {
        detail: DayDetail,
        _dismiss: L,
        _refresh: T,
    },
}

pub struct DayPanel<R: PanelResources> {
    resources: R,
    refresh_interval_ms: u32,
    state: PanelState<R::DismissListener, R::RefreshTimer>,
}

impl<R: PanelResources> DayPanel<R> {
    pub fn new(resources: R) -> Self {
        Self::with_refresh_interval(resources, DEFAULT_REFRESH_INTERVAL_MS)
    }

    pub fn with_refresh_interval(resources: R, refresh_interval_ms: u32) -> Self {
        Self {
            resources,
            refresh_interval_ms,
            state: PanelState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open { .. })
    }

    pub fn detail(&self) -> Option<&DayDetail> {
        match &self.state {
            PanelState::Open { detail, .. } => Some(detail),
            PanelState::Closed => None,
        }
    }

    /// Show `date_key`, replacing any panel already open.
    pub fn open(&mut self, date_key: impl Into<String>, slots: Vec<DaySlot>) {
        self.close();

        let detail = DayDetail::new(date_key, slots);
        tracing::debug!(date = %detail.date_key, slots = detail.slots.len(), "opening day panel");

        let dismiss = self.resources.listen_for_dismiss();
        let refresh = self.resources.start_refresh(self.refresh_interval_ms);
        self.state = PanelState::Open {
            detail,
            _dismiss: dismiss,
            _refresh: refresh,
        };
    }

    /// Close the panel, releasing its listener and timer. Returns whether
    /// a panel was open; closing a closed panel does nothing.
    pub fn close(&mut self) -> bool {
        match std::mem::replace(&mut self.state, PanelState::Closed) {
            PanelState::Open { detail, .. } => {
                tracing::debug!(date = %detail.date_key, "closing day panel");
                true
            }
            PanelState::Closed => false,
        }
    }

    /// Apply a document click; returns true when it closed the panel.
    pub fn handle_document_click(&mut self, inside_panel: bool, on_day_cell: bool) -> bool {
        if should_dismiss(self.is_open(), inside_panel, on_day_cell) {
            self.close()
        } else {
            false
        }
    }
}
