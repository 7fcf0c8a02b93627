//! Render the editor for one curve as a static HTML page.
//!
//! ```text
//! curvetoy [CURVE] [--config FILE] [--library FILE] [--open SHARED] [--share]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    if let Err(e) = native::run(native::Args::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::Write;
    use std::path::PathBuf;

    use clap::Parser;
    use cubic_bezier::SvgSurface;
    use curvetoy::{Controller, ToyConfig, ToyError, UiContext};

    #[derive(Parser, Debug)]
    #[command(name = "curvetoy", about = "Render the cubic-bezier editor as a static HTML page")]
    pub struct Args {
        /// Curve to open, as `a,b,c,d` or `#a,b,c,d`
        curve: Option<String>,

        /// JSON settings file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Exported library JSON to show in the gallery
        #[arg(long)]
        library: Option<PathBuf>,

        /// Open a share string
        #[arg(long)]
        open: Option<String>,

        /// Print a share string instead of the page
        #[arg(long)]
        share: bool,
    }

    pub fn run(args: Args) -> Result<(), ToyError> {
        let config = match &args.config {
            Some(path) => ToyConfig::from_file(path)?,
            None => ToyConfig::default(),
        };
        let ui = UiContext {
            curve: SvgSurface::new(config.editor_size),
            current: SvgSurface::new(config.preview_size),
            compare: SvgSurface::new(config.preview_size),
            current_timing: Box::new(|timing: &str, duration: Option<f64>| {
                log::debug!("timing {} over {:?}s", timing, duration)
            }),
            compare_timing: Box::new(|timing: &str, _: Option<f64>| {
                log::debug!("comparing with {}", timing)
            }),
            history: Box::new(|fragment: &str| log::info!("location {}", fragment)),
        };
        let mut controller = Controller::new(config, ui)?;
        controller.init(args.curve.as_deref())?;
        if let Some(path) = &args.library {
            controller.import_library(&std::fs::read_to_string(path)?)?;
        }
        if let Some(shared) = &args.open {
            controller.open_shared(shared)?;
        }

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if args.share {
            writeln!(out, "{}", controller.share()?)?;
            return Ok(());
        }
        write_page(&mut out, &controller)?;
        Ok(())
    }

    fn write_page(out: &mut impl Write, controller: &Controller<SvgSurface>) -> Result<(), ToyError> {
        let curve = controller.curve();
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html><head><title>{}</title></head><body>", curve)?;
        writeln!(out, "<section id=\"editor\">{}</section>", controller.ui().curve.to_svg())?;
        writeln!(
            out,
            "<p><code>cubic-bezier({})</code></p>",
            controller.params().join(", ")
        )?;
        writeln!(out, "<section id=\"current\">{}</section>", controller.ui().current.to_svg())?;
        writeln!(out, "<section id=\"library\">")?;
        let rendered = controller.render_gallery(|_, size| Ok(SvgSurface::new(size)));
        for (name, surface) in rendered {
            let surface = match surface {
                Ok(surface) => surface,
                Err(_) => continue,
            };
            let href = controller
                .library()
                .get(&name)
                .map(|c| c.fragment())
                .unwrap_or_default();
            writeln!(
                out,
                "<a href=\"#{}\">{}<span>{}</span></a>",
                href,
                surface.to_svg(),
                escape(&name)
            )?;
        }
        writeln!(out, "</section></body></html>")?;
        Ok(())
    }

    fn escape(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Result<Args, clap::Error> {
            Args::try_parse_from(std::iter::once("curvetoy").chain(list.iter().copied()))
        }

        #[test]
        fn flags() {
            let parsed = args(&[".42,0,1,1", "--config", "toy.json", "--share"]).unwrap();
            assert_eq!(parsed.curve.as_deref(), Some(".42,0,1,1"));
            assert_eq!(parsed.config, Some(PathBuf::from("toy.json")));
            assert!(parsed.share);
            assert!(parsed.open.is_none());
            assert!(args(&["--config"]).is_err());
            assert!(args(&["--frobnicate"]).is_err());
        }

        #[test]
        fn page_has_everything() {
            let config = ToyConfig::default();
            let ui = UiContext {
                curve: SvgSurface::new(config.editor_size),
                current: SvgSurface::new(config.preview_size),
                compare: SvgSurface::new(config.preview_size),
                current_timing: Box::new(|_: &str, _: Option<f64>| ()),
                compare_timing: Box::new(|_: &str, _: Option<f64>| ()),
                history: Box::new(|_: &str| ()),
            };
            let mut controller = Controller::new(config, ui).unwrap();
            controller.init(Some("#0,0,.58,1")).unwrap();
            controller.save_current("<mine>");
            let mut page = Vec::new();
            write_page(&mut page, &controller).unwrap();
            let page = String::from_utf8(page).unwrap();
            assert!(page.contains("cubic-bezier(0, 0, .58, 1)"));
            assert!(page.contains("<span>&lt;mine&gt;</span>"));
            assert_eq!(page.matches("<a href=").count(), 6);
        }
    }
}
