//! The search panel session.
//!
//! Panel state lives in one explicit [`PanelState`] value; every interaction
//! is a [`PanelEvent`] folded in by the pure [`state::apply`] reducer. The
//! [`Panel`] wrapper owns the state plus a sequence guard so metadata from a
//! superseded index selection can never overwrite a newer one.

pub mod input;
pub mod state;

use geoq_client::{Client, ClientError, SeqGuard};
use geoq_query::{RawBodyError, RawRequest, SearchRequest};
use serde_json::Value;

pub use input::{FilterControl, build_control};
pub use state::{PanelEvent, PanelState, Tab};

/// A live panel session: state, reducer, and load sequencing.
#[derive(Debug, Default)]
pub struct Panel {
    /// Current session state.
    state: PanelState,
    /// Latest-wins guard for index metadata loads.
    loads: SeqGuard,
}

impl Panel {
    /// A fresh panel with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Folds one event into the state.
    pub fn apply(&mut self, event: PanelEvent) {
        self.state = state::apply(self.state.clone(), event);
    }

    /// Selects an index and loads its field metadata.
    ///
    /// The load is ticketed: if a newer selection begins while this one's
    /// response is in flight, the stale metadata is dropped instead of
    /// overwriting the newer selection's.
    pub async fn select_index(&mut self, client: &Client, index: &str) -> Result<(), ClientError> {
        let ticket = self.loads.begin();
        self.apply(PanelEvent::IndexSelected(index.to_string()));

        let fields = client.get_fields(index).await?;

        if self.loads.is_current(ticket) {
            self.apply(PanelEvent::MetadataLoaded(fields));
        }
        Ok(())
    }

    /// Builds the request body for the active tab.
    ///
    /// The guided tab folds the session state into a fresh request; the raw
    /// tab validates the edited body and uses it verbatim.
    pub fn build_request(&self) -> Result<Value, RawBodyError> {
        match self.state.tab {
            Tab::Guided => Ok(SearchRequest::build(
                &self.state.output_fields,
                &self.state.filters,
                self.state.apply_thematic,
                &self.state.spatial,
            )
            .to_value()),
            Tab::Raw => RawRequest::parse(&self.state.raw_body).map(RawRequest::into_value),
        }
    }
}
