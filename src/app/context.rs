use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, Window};

/// Browser handles a demo is mounted into. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct SceneContext {
    pub window: Window,
    pub document: Document,
    pub container: Element,
}

impl SceneContext {
    /// Look up the container element matching `selector`
    pub fn from_selector(selector: &str) -> Result<Self, String> {
        let window = web_sys::window().ok_or("No global window")?;
        let document = window.document().ok_or("Window has no document")?;
        let container = document
            .query_selector(selector)
            .map_err(|e| format!("Invalid selector {:?}: {:?}", selector, e))?
            .ok_or_else(|| format!("No element matches {:?}", selector))?;

        Ok(Self {
            window,
            document,
            container,
        })
    }

    /// Container size in CSS pixels
    pub fn size(&self) -> (u32, u32) {
        let width = self.container.client_width().max(0) as u32;
        let height = self.container.client_height().max(0) as u32;
        (width, height)
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    /// Create a canvas and append it to the container
    pub fn append_canvas(&self) -> Result<HtmlCanvasElement, String> {
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(|e| format!("Failed to create canvas: {:?}", e))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "Element is not a canvas".to_string())?;

        self.container
            .append_child(&canvas)
            .map_err(|e| format!("Failed to attach canvas: {:?}", e))?;

        Ok(canvas)
    }
}
