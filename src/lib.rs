use wasm_bindgen::prelude::*;

pub mod logging;
pub mod math;
pub mod scene;
pub mod mesh;
pub mod fractal;
pub mod camera;
pub mod controls;
pub mod render;
pub mod animation;
pub mod config;
pub mod app;

pub use app::DemoHandle;

use app::{start_demo, CubeDemo, FractalTreeDemo};
use config::DemoConfig;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn with_container(mut config: DemoConfig, selector: &str) -> DemoConfig {
    config.container = selector.to_string();
    config
}

/// Spinning cube inside the element matching `selector`
#[wasm_bindgen]
pub fn start_cube_demo(selector: &str) -> Result<DemoHandle, JsValue> {
    start_demo(CubeDemo::new(), with_container(DemoConfig::cube(), selector))
        .map_err(|e| JsValue::from_str(&e))
}

/// Cube demo with a YAML overlay on its defaults; `selector` wins over `container`
#[wasm_bindgen]
pub fn start_cube_demo_with_config(selector: &str, yaml: &str) -> Result<DemoHandle, JsValue> {
    let config = DemoConfig::from_yaml(yaml, DemoConfig::cube()).map_err(|e| JsValue::from_str(&e))?;
    start_demo(CubeDemo::new(), with_container(config, selector)).map_err(|e| JsValue::from_str(&e))
}

/// Fractal tree with orbit controls inside the element matching `selector`
#[wasm_bindgen]
pub fn start_fractal_tree_demo(selector: &str) -> Result<DemoHandle, JsValue> {
    start_demo(FractalTreeDemo::new(), with_container(DemoConfig::fractal_tree(), selector))
        .map_err(|e| JsValue::from_str(&e))
}

/// Fractal tree with a YAML overlay on its defaults; `selector` wins over `container`
#[wasm_bindgen]
pub fn start_fractal_tree_demo_with_config(selector: &str, yaml: &str) -> Result<DemoHandle, JsValue> {
    let config = DemoConfig::from_yaml(yaml, DemoConfig::fractal_tree()).map_err(|e| JsValue::from_str(&e))?;
    start_demo(FractalTreeDemo::new(), with_container(config, selector)).map_err(|e| JsValue::from_str(&e))
}
