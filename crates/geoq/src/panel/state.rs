//! Panel state and the event reducer.

use geoq_client::IndexFields;
use geoq_query::{FilterEntry, FilterSet, GEOMETRY_FIELD, SpatialState};

/// The panel's two tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// The guided query builder.
    #[default]
    Guided,
    /// The raw JSON editor.
    Raw,
}

/// The whole session state of the search panel.
#[derive(Debug, Clone)]
pub struct PanelState {
    /// Selected index, if any.
    pub index: Option<String>,
    /// Field metadata for the selected index.
    pub metadata: IndexFields,
    /// Fields chosen for result attributes (geometry is implicit).
    pub output_fields: Vec<String>,
    /// Active thematic filter entries.
    pub filters: FilterSet,
    /// Whether thematic filters are applied to built requests.
    ///
    /// The toggle gates application, not collection: turning it off leaves
    /// the entries in place.
    pub apply_thematic: bool,
    /// Active spatial constraint.
    pub spatial: SpatialState,
    /// Active tab.
    pub tab: Tab,
    /// Contents of the raw JSON editor.
    pub raw_body: String,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            index: None,
            metadata: IndexFields::default(),
            output_fields: Vec::new(),
            filters: FilterSet::default(),
            apply_thematic: true,
            spatial: SpatialState::default(),
            tab: Tab::default(),
            raw_body: String::new(),
        }
    }
}

/// One panel interaction.
#[derive(Debug, Clone)]
pub enum PanelEvent {
    /// A new index was selected; index-derived state resets.
    IndexSelected(String),
    /// Field metadata for the selected index arrived.
    MetadataLoaded(IndexFields),
    /// A field was added to the output list.
    OutputFieldAdded(String),
    /// A field's filter entry was set or replaced.
    FilterSet(FilterEntry),
    /// A field's filter entry was removed.
    FilterCleared(String),
    /// The thematic-filter toggle changed.
    ThematicToggled(bool),
    /// The spatial constraint changed.
    SpatialSet(SpatialState),
    /// The active tab changed.
    TabSwitched(Tab),
    /// The raw editor content changed.
    RawEdited(String),
    /// The clear action: everything back to defaults.
    Cleared,
}

/// Folds one event into the state, returning the new state.
///
/// Pure: no I/O, no hidden mutation. Metadata arrival is its own event so
/// the caller can gate it on load sequencing.
pub fn apply(state: PanelState, event: PanelEvent) -> PanelState {
    let mut state = state;
    match event {
        PanelEvent::IndexSelected(index) => {
            // Field choices and filters belong to the previous index.
            state.index = Some(index);
            state.metadata = IndexFields::default();
            state.output_fields.clear();
            state.filters.clear();
        }
        PanelEvent::MetadataLoaded(fields) => {
            state.metadata = fields;
        }
        PanelEvent::OutputFieldAdded(field) => {
            if field != GEOMETRY_FIELD && !state.output_fields.contains(&field) {
                state.output_fields.push(field);
            }
        }
        PanelEvent::FilterSet(entry) => {
            state.filters.set(entry);
        }
        PanelEvent::FilterCleared(field) => {
            state.filters.clear_field(&field);
        }
        PanelEvent::ThematicToggled(enabled) => {
            state.apply_thematic = enabled;
        }
        PanelEvent::SpatialSet(spatial) => {
            state.spatial = spatial;
        }
        PanelEvent::TabSwitched(tab) => {
            state.tab = tab;
        }
        PanelEvent::RawEdited(body) => {
            state.raw_body = body;
        }
        PanelEvent::Cleared => {
            state = PanelState::default();
        }
    }
    state
}
