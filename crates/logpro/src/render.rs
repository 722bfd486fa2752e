//! Content rendering and entry framing

use chrono::{DateTime, Utc};
use logpro_core::TIMESTAMP_FORMAT;
use serde::Serialize;
use std::fmt::Debug;

/// Anything that can be written as a log entry
pub trait Render {
    fn render(&self) -> String;
}

macro_rules! render_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

render_display!(
    str, String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<T: Render + ?Sized> Render for &T {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl Render for serde_json::Value {
    fn render(&self) -> String {
        match self {
            serde_json::Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

/// Structured content, written as 2-space indented JSON.
///
/// When serialization fails the `Debug` form is written instead.
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

impl<T: Serialize + Debug> Render for Json<T> {
    fn render(&self) -> String {
        match serde_json::to_string_pretty(&self.0) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Falling back to plain rendering: {}", e);
                format!("{:?}", self.0)
            }
        }
    }
}

/// Frame an entry: optional timestamp line, body, `blank_lines + 1` newlines
pub fn frame_entry(body: &str, timestamp: Option<DateTime<Utc>>, blank_lines: usize) -> String {
    let mut out = String::with_capacity(body.len() + blank_lines + 32);
    if let Some(ts) = timestamp {
        out.push('[');
        out.push_str(&ts.format(TIMESTAMP_FORMAT).to_string());
        out.push_str("]\n");
    }
    out.push_str(body);
    out.push_str(&"\n".repeat(blank_lines + 1));
    out
}

/// Render and frame content, stamped with the current time when requested
pub fn format_entry<C: Render + ?Sized>(
    content: &C,
    show_timestamp: bool,
    blank_lines: usize,
) -> String {
    let timestamp = show_timestamp.then(Utc::now);
    frame_entry(&content.render(), timestamp, blank_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::ser::{Error as _, Serializer};
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_scalars_render_plainly() {
        assert_eq!("hello".render(), "hello");
        assert_eq!(String::from("x").render(), "x");
        assert_eq!(42u32.render(), "42");
        assert_eq!(true.render(), "true");
        assert_eq!(1.5f64.render(), "1.5");
    }

    #[test]
    fn test_value_renders_pretty() {
        assert_eq!(json!({"x": 1}).render(), "{\n  \"x\": 1\n}");
        assert_eq!(json!("raw").render(), "raw");
        assert_eq!(json!(null).render(), "null");
    }

    #[test]
    fn test_json_round_trip() {
        let value = json!({"name": "probe", "nested": {"a": 1, "b": [1, 2, 3]}});
        let text = Json(&value).render();
        assert!(text.contains("\n  \"name\""));
        let back: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_unserializable_map_falls_back_to_debug() {
        let mut map = HashMap::new();
        map.insert((1, 2), "pair");
        let text = Json(&map).render();
        assert_eq!(text, "{(1, 2): \"pair\"}");
    }

    #[derive(Debug)]
    struct Refuses;

    impl Serialize for Refuses {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cycle detected"))
        }
    }

    #[test]
    fn test_failing_serialize_falls_back_to_debug() {
        assert_eq!(Json(Refuses).render(), "Refuses");
    }

    #[test]
    fn test_frame_without_timestamp() {
        assert_eq!(frame_entry("hello", None, 1), "hello\n\n");
        assert_eq!(frame_entry("hello", None, 0), "hello\n");
        assert_eq!(frame_entry("hello", None, 3), "hello\n\n\n\n");
    }

    #[test]
    fn test_frame_with_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(
            frame_entry("hello", Some(ts), 1),
            "[2024-03-09 07:05:01.042]\nhello\n\n"
        );
    }

    #[test]
    fn test_format_entry_timestamp_line() {
        let text = format_entry("x", true, 1);
        assert!(text.starts_with("[20"));
        assert!(text.ends_with("]\nx\n\n"));
    }
}
