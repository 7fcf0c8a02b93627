//! Renders a saved curve library as a page of thumbnails.
//!
//! The input is a JSON object mapping names to curves, as exported by the
//! editor:
//!
//! ```json
//! { "snappy": ".9,-.3,.1,1.3", "ease": "cubic-bezier(.25,.1,.25,1)" }
//! ```

use cubic_bezier::{Library, SvgSurface, Thumbnails};

fn main() {
    let path = std::env::args().nth(1).expect("needs filename");
    let data = std::fs::read_to_string(path).unwrap();
    let entries: Vec<(String, String)> = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&data)
        .unwrap()
        .into_iter()
        .filter_map(|(name, value)| Some((name, value.as_str()?.to_owned())))
        .collect();
    let mut library = Library::new();
    for (name, err) in library.load(entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))) {
        eprintln!("skipping {}: {}", name, err);
    }
    let thumbs = Thumbnails::default();
    println!("<!DOCTYPE html>\n<html>\n<body>");
    for (name, svg) in library.render(&thumbs, |_, size| Ok(SvgSurface::new(size))) {
        if let Ok(svg) = svg {
            println!("  <figure>{}<figcaption>{}</figcaption></figure>", svg.to_svg(), name);
        }
    }
    println!("</body>\n</html>");
}
