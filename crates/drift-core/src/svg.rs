//! Minimal SVG document reader: the root bounding box plus every `<path>`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::layout::ViewBox;
use crate::{Result, SceneError};

/// Attributes of one `<path>` element, unparsed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathElement {
    pub id: Option<String>,
    pub d: String,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    pub view_box: ViewBox,
    pub paths: Vec<PathElement>,
}

/// Parse SVG text. Fails when the document has no bounding box or no paths.
pub fn parse_document(xml: &str) -> Result<SvgDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut view_box = None;
    let mut seen_root = false;
    let mut paths = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match local.as_str() {
                    "svg" if !seen_root => {
                        seen_root = true;
                        view_box = parse_root_box(&e)?;
                    }
                    "path" => {
                        if let Some(p) = parse_path_element(&e)? {
                            paths.push(p);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SceneError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let view_box = view_box.ok_or(SceneError::MissingViewBox)?;
    if paths.is_empty() {
        return Err(SceneError::NoPaths);
    }
    Ok(SvgDocument { view_box, paths })
}

fn attributes(e: &BytesStart) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| SceneError::Attribute(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        out.push((key, value));
    }
    Ok(out)
}

fn parse_root_box(e: &BytesStart) -> Result<Option<ViewBox>> {
    let mut view_box = None;
    let mut width = None;
    let mut height = None;
    for (key, value) in attributes(e)? {
        match key.as_str() {
            "viewBox" => view_box = parse_view_box(&value),
            "width" => width = parse_length(&value),
            "height" => height = parse_length(&value),
            _ => {}
        }
    }
    Ok(view_box.or(match (width, height) {
        (Some(w), Some(h)) => Some(ViewBox {
            x: 0.0,
            y: 0.0,
            width: w,
            height: h,
        }),
        _ => None,
    }))
}

fn parse_path_element(e: &BytesStart) -> Result<Option<PathElement>> {
    let mut el = PathElement::default();
    let mut style = None;
    for (key, value) in attributes(e)? {
        match key.as_str() {
            "id" => el.id = Some(value),
            "d" => el.d = value,
            "fill" => el.fill = non_empty(value),
            "stroke" => el.stroke = non_empty(value),
            "stroke-width" => el.stroke_width = parse_length(&value),
            "style" => style = Some(value),
            _ => {}
        }
    }
    // Inline style declarations win over presentation attributes.
    if let Some(style) = style {
        for decl in style.split(';') {
            let Some((k, v)) = decl.split_once(':') else {
                continue;
            };
            let v = v.trim().to_string();
            match k.trim() {
                "fill" => el.fill = non_empty(v),
                "stroke" => el.stroke = non_empty(v),
                "stroke-width" => el.stroke_width = parse_length(&v),
                _ => {}
            }
        }
    }
    if el.d.trim().is_empty() {
        log::warn!("[scene] skipping <path> without data (id={:?})", el.id);
        return Ok(None);
    }
    Ok(Some(el))
}

fn non_empty(v: String) -> Option<String> {
    let t = v.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// `"0 0 120 80"` or `"0,0,120,80"`.
pub fn parse_view_box(value: &str) -> Option<ViewBox> {
    let nums: Vec<f32> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    match nums.as_slice() {
        [x, y, w, h] => Some(ViewBox {
            x: *x,
            y: *y,
            width: *w,
            height: *h,
        }),
        _ => None,
    }
}

/// Leading number of a length such as `"12.5px"`; units are dropped.
pub fn parse_length(value: &str) -> Option<f32> {
    let v = value.trim();
    let end = v
        .char_indices()
        .find(|(i, c)| {
            !(c.is_ascii_digit() || *c == '.' || ((*c == '-' || *c == '+') && *i == 0))
        })
        .map(|(i, _)| i)
        .unwrap_or(v.len());
    v[..end].parse().ok()
}
