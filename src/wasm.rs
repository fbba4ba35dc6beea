//! JavaScript bindings.

use wasm_bindgen::prelude::*;

use crate::converters::svg::generate_text_svg;
use crate::models::options::SvgTextOptions;

/// Installs the panic hook and routes `log` output to the browser console.
/// Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    {
        // A second init fails because the logger is already set; that is fine.
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

/// Generates an avatar from a JSON options document (same shape as `SvgTextOptions`).
/// Throws the error message as a string on invalid input.
#[wasm_bindgen(js_name = generateTextSvg)]
pub fn generate_text_svg_js(options_json: &str) -> Result<String, JsValue> {
    SvgTextOptions::from_json(options_json)
        .and_then(|options| generate_text_svg(&options))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_options_produce_svg() {
        let svg = generate_text_svg_js(
            r#"{"text": "Hello World", "seed": "hello-1", "max_chars_per_line": 16}"#,
        )
        .unwrap();
        assert!(svg.contains("fill='hsl(181, 46%, 45%)'"));
        assert!(svg.ends_with("</svg>"));
    }
}
