//! WASM bindings for a browser front end

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{describe_round, describe_strategy, MatchEngine, Move, Strategy};

/// A match session owned by the page
#[wasm_bindgen]
pub struct WasmMatch {
    engine: MatchEngine,
}

#[wasm_bindgen]
impl WasmMatch {
    /// Start a session. Without a seed one is drawn from `Math.random`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> WasmMatch {
        let seed = seed.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
        WasmMatch {
            engine: MatchEngine::with_seed(seed),
        }
    }

    /// Play a round from a move id (0 Rock, 1 Paper, 2 Scissors)
    ///
    /// # Returns
    /// Serialized RoundResult
    pub fn play(&mut self, move_id: u8) -> Result<JsValue, JsError> {
        let result = self.engine.play(move_id)
            .map_err(|e| JsError::new(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Play a round from a JSON move name such as `"Rock"`
    pub fn play_named(&mut self, move_json: &str) -> Result<JsValue, JsError> {
        let user_move: Move = serde_json::from_str(move_json)
            .map_err(|e| JsError::new(&format!("Invalid move: {}", e)))?;
        let result = self.engine.play_round(user_move);

        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Text of the last round, or an empty string before the first one
    pub fn last_round_text(&self) -> String {
        self.engine.last_result().map(describe_round).unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Serialized Tally
    pub fn tally(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.engine.tally())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: Strategy,
    name: &'static str,
    description: &'static str,
}

/// Get all opponent strategies in dispatch priority order
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = Strategy::ALL
        .iter()
        .map(|s| StrategyInfo {
            id: *s,
            name: s.label(),
            description: describe_strategy(*s),
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
