// ============================================================================
// USE AUTOCOMPLETE - Sugerencias para los inputs de recogida y destino
// ============================================================================
// Cada input tiene su propia lista. El campo activo cambia al enfocar o
// pulsar un input, no solo al escribir, así que elegir una sugerencia
// siempre rellena el input que el usuario está mirando.
// ============================================================================

use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::Suggestion;
use crate::services::ApiClient;

/// Input de búsqueda
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchField {
    Pickup,
    Destination,
}

/// Solo acepta la respuesta a la consulta más reciente
#[derive(Debug, Default)]
pub struct LatestQuery {
    seq: u64,
}

impl LatestQuery {
    pub fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }
}

/// Una secuencia por input: escribir en uno no invalida el otro
#[derive(Debug, Default)]
pub struct FieldQueries {
    pickup: LatestQuery,
    destination: LatestQuery,
}

impl FieldQueries {
    pub fn get_mut(&mut self, field: SearchField) -> &mut LatestQuery {
        match field {
            SearchField::Pickup => &mut self.pickup,
            SearchField::Destination => &mut self.destination,
        }
    }

    pub fn get(&self, field: SearchField) -> &LatestQuery {
        match field {
            SearchField::Pickup => &self.pickup,
            SearchField::Destination => &self.destination,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuggestionLists {
    pub active: Option<SearchField>,
    pickup: Vec<Suggestion>,
    destination: Vec<Suggestion>,
}

pub enum SuggestionAction {
    Focus(SearchField),
    Loaded(SearchField, Vec<Suggestion>),
    Clear(SearchField),
}

impl SuggestionLists {
    pub fn for_field(&self, field: SearchField) -> &[Suggestion] {
        match field {
            SearchField::Pickup => &self.pickup,
            SearchField::Destination => &self.destination,
        }
    }

    /// Lista del campo activo
    pub fn visible(&self) -> &[Suggestion] {
        self.active.map(|field| self.for_field(field)).unwrap_or(&[])
    }

    fn slot(&mut self, field: SearchField) -> &mut Vec<Suggestion> {
        match field {
            SearchField::Pickup => &mut self.pickup,
            SearchField::Destination => &mut self.destination,
        }
    }
}

impl Reducible for SuggestionLists {
    type Action = SuggestionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SuggestionAction::Focus(field) => next.active = Some(field),
            SuggestionAction::Loaded(field, found) => *next.slot(field) = found,
            SuggestionAction::Clear(field) => next.slot(field).clear(),
        }
        Rc::new(next)
    }
}

#[derive(Clone)]
pub struct UseAutocompleteHandle {
    pub field: Option<SearchField>,
    /// Sugerencias del campo activo
    pub suggestions: Vec<Suggestion>,
    pub focus: Callback<SearchField>,
    /// Texto nuevo escrito en el campo
    pub query: Callback<(SearchField, String)>,
    pub clear: Callback<SearchField>,
}

#[hook]
pub fn use_autocomplete() -> UseAutocompleteHandle {
    let lists = use_reducer(SuggestionLists::default);
    let queries = use_mut_ref(FieldQueries::default);

    let focus = {
        let lists = lists.dispatcher();
        Callback::from(move |field: SearchField| lists.dispatch(SuggestionAction::Focus(field)))
    };

    let query = {
        let lists = lists.dispatcher();
        let queries = queries.clone();
        Callback::from(move |(field, input): (SearchField, String)| {
            lists.dispatch(SuggestionAction::Focus(field));
            let seq = queries.borrow_mut().get_mut(field).begin();
            if input.trim().is_empty() {
                lists.dispatch(SuggestionAction::Clear(field));
                return;
            }

            let lists = lists.clone();
            let queries = queries.clone();
            spawn_local(async move {
                match ApiClient::new().autocomplete(&input).await {
                    Ok(found) if queries.borrow().get(field).is_current(seq) => {
                        lists.dispatch(SuggestionAction::Loaded(field, found));
                    }
                    Ok(_) => log::debug!("🔎 Sugerencias obsoletas para '{}' descartadas", input),
                    Err(e) => log::error!("❌ Error en autocompletado: {}", e),
                }
            });
        })
    };

    let clear = {
        let lists = lists.dispatcher();
        let queries = queries.clone();
        Callback::from(move |field: SearchField| {
            queries.borrow_mut().get_mut(field).begin();
            lists.dispatch(SuggestionAction::Clear(field));
        })
    };

    UseAutocompleteHandle {
        field: lists.active,
        suggestions: lists.visible().to_vec(),
        focus,
        query,
        clear,
    }
}
