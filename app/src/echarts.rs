//! ECharts JS interop.
//!
//! The charting library is an external, opaque rendering collaborator: this
//! module only creates instances, hands them serialized option objects and
//! forwards resize/dispose calls. Interop failures degrade to no-ops.

use dioxus_logger::tracing::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use prism_types::{PatternFill, SeriesFill};

/// Delay before touching chart DOM nodes, so elements exist after render.
pub const RENDER_SETTLE_MS: u32 = 150;

/// Container width below which data labels are suppressed to save space.
pub const LABEL_MIN_WIDTH: f64 = 420.0;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = echarts, js_name = init)]
    fn echarts_init(dom: &web_sys::Element) -> JsValue;

    #[wasm_bindgen(js_namespace = echarts, js_name = getInstanceByDom)]
    fn echarts_get_instance(dom: &web_sys::Element) -> JsValue;
}

fn element_by_id(element_id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(element_id)
}

/// Get or create the chart instance bound to the given container element.
pub fn init_chart(element_id: &str) -> Option<JsValue> {
    let element = element_by_id(element_id)?;

    let existing = echarts_get_instance(&element);
    if !existing.is_null() && !existing.is_undefined() {
        return Some(existing);
    }

    Some(echarts_init(&element))
}

fn call_method0(target: &JsValue, name: &str) {
    let method = js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());

    if let Some(func) = method {
        let _ = func.call0(target);
    }
}

pub fn set_chart_option(chart: &JsValue, option: &JsValue) {
    let set_option = js_sys::Reflect::get(chart, &JsValue::from_str("setOption"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());

    if let Some(func) = set_option {
        let _ = func.call1(chart, option);
    }
}

pub fn resize_chart(chart: &JsValue) {
    call_method0(chart, "resize");
}

pub fn dispose_chart(element_id: &str) {
    if let Some(element) = element_by_id(element_id) {
        let instance = echarts_get_instance(&element);
        if !instance.is_null() && !instance.is_undefined() {
            call_method0(&instance, "dispose");
        }
    }
}

/// Subscribe to a chart event (`chart.on(event, handler)`). The handler
/// closure is leaked so the chart can call it for the page's lifetime.
pub fn on_chart_event(chart: &JsValue, event: &str, handler: Closure<dyn FnMut(JsValue)>) {
    let on = js_sys::Reflect::get(chart, &JsValue::from_str("on"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());

    if let Some(func) = on {
        let _ = func.call2(chart, &JsValue::from_str(event), handler.as_ref());
    }
    handler.forget();
}

/// Register a window resize listener for the page's lifetime.
pub fn on_window_resize(handler: Closure<dyn FnMut()>) {
    if let Some(window) = web_sys::window()
        && window
            .add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref())
            .is_err()
    {
        warn!("failed to register resize listener");
    }
    handler.forget();
}

/// Current width of a container element, if it is mounted.
pub fn element_width(element_id: &str) -> Option<f64> {
    element_by_id(element_id).map(|e| e.client_width() as f64)
}

/// Whether the container is wide enough for data labels.
pub fn labels_fit(element_id: &str) -> bool {
    element_width(element_id).is_none_or(|width| width >= LABEL_MIN_WIDTH)
}

/// Serialize an option tree for `setOption`. Serialization of these plain
/// structs cannot fail; a failure would be a bug, so it degrades to null
/// (which ECharts ignores) with a log line.
pub fn to_option<T: Serialize>(option: &T) -> JsValue {
    serde_wasm_bindgen::to_value(option).unwrap_or_else(|err| {
        warn!("failed to serialize chart option: {err}");
        JsValue::NULL
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared option fragments
// ─────────────────────────────────────────────────────────────────────────────

/// Dot-pattern overlay, the renderer's encoding of [`PatternFill`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decal {
    pub symbol: String,
    pub symbol_size: f64,
    pub color: String,
    pub dash_array_x: [u32; 2],
    pub dash_array_y: [u32; 2],
    pub rotation: f64,
}

impl Decal {
    fn from_pattern(pattern: &PatternFill) -> Self {
        Self {
            symbol: "circle".to_string(),
            symbol_size: 0.4,
            color: pattern.dot_color.clone(),
            dash_array_x: [1, pattern.width],
            dash_array_y: [1, pattern.height],
            rotation: std::f64::consts::FRAC_PI_4,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decal: Option<Decal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
}

impl ItemStyle {
    pub fn from_fill(fill: &SeriesFill) -> Self {
        match fill {
            SeriesFill::Solid(color) => Self::solid(color),
            SeriesFill::Pattern(pattern) => Self {
                color: pattern.background.clone(),
                decal: Some(Decal::from_pattern(pattern)),
                border_color: None,
                border_width: None,
            },
        }
    }

    pub fn solid(color: &str) -> Self {
        Self {
            color: color.to_string(),
            decal: None,
            border_color: None,
            border_width: None,
        }
    }

    pub fn with_border(mut self, color: &str, width: f64) -> Self {
        self.border_color = Some(color.to_string());
        self.border_width = Some(width);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Label {
    pub fn hidden() -> Self {
        Self {
            show: false,
            formatter: None,
            position: None,
            color: None,
        }
    }

    pub fn text(formatter: impl Into<String>) -> Self {
        Self {
            show: true,
            formatter: Some(formatter.into()),
            position: None,
            color: None,
        }
    }

    pub fn at(mut self, position: &str) -> Self {
        self.position = Some(position.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub trigger: String,
}

impl Tooltip {
    pub fn item() -> Self {
        Self {
            trigger: "item".to_string(),
        }
    }
}
