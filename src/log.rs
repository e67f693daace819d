//! Console logging. On wasm32 these forward to `console.log` / `console.warn`;
//! native builds (tests) type-check the arguments and print nothing.

#[cfg(target_arch = "wasm32")]
macro_rules! console_log {
    ($($t:tt)*) => {
        web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&format!($($t)*)))
    };
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! console_log {
    ($($t:tt)*) => {
        if false {
            let _ = format!($($t)*);
        }
    };
}

#[cfg(target_arch = "wasm32")]
macro_rules! console_warn {
    ($($t:tt)*) => {
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&format!($($t)*)))
    };
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! console_warn {
    ($($t:tt)*) => {
        if false {
            let _ = format!($($t)*);
        }
    };
}
