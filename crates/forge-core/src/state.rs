//! `BuildState`: a free-form scratchpad shared among every node for the
//! duration of one platform instance. The platform never inspects its
//! contents; nodes use it to pass opaque data to each other.

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

pub type BuildState = Arc<Mutex<Map<String, Value>>>;

pub fn new_build_state() -> BuildState {
    Arc::new(Mutex::new(Map::new()))
}
