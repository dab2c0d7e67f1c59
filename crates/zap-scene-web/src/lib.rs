//! Browser bridge for `zap-scene`: a Canvas2D [`Surface`](zap_scene::Surface),
//! an `HtmlImageElement` loader and the `requestAnimationFrame` driver.

pub mod canvas;
pub mod error;
pub mod loader;
pub mod runner;

pub use canvas::{CanvasSurface, ImageTable};
pub use error::BridgeError;
pub use loader::HtmlImageLoader;
pub use runner::StageRunner;

use std::cell::RefCell;
use log::info;
use wasm_bindgen::prelude::*;
use zap_scene::{Stage, StageConfig};

thread_local! {
    static RUNNER: RefCell<Option<StageRunner>> = const { RefCell::new(None) };
}

/// Bind a stage to the canvas with id `canvas_id` and start its frame loop.
///
/// `config_json` is a (possibly partial) [`StageConfig`] document; an empty
/// string uses the defaults. Calling `start` again replaces the running stage.
#[wasm_bindgen]
pub fn start(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = if config_json.trim().is_empty() {
        StageConfig::default()
    } else {
        StageConfig::from_json(config_json).map_err(BridgeError::from)?
    };
    let _ = console_log::init_with_level(config.log_level());

    let mut runner = StageRunner::attach_by_id(canvas_id, config)?;
    runner.start()?;
    info!("zap-scene: running on #{canvas_id}");

    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
    Ok(())
}

/// Run `f` against the running stage and its image loader.
/// Returns `None` before [`start`] has succeeded.
pub fn with_stage<R>(f: impl FnOnce(&mut Stage<CanvasSurface>, &mut HtmlImageLoader) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut runner = cell.borrow_mut();
        let runner = runner.as_mut()?;
        let stage = runner.stage();
        let mut stage = stage.try_borrow_mut().ok()?;
        Some(f(&mut stage, runner.loader()))
    })
}
