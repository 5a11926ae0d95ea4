//! Browser entry point for the homepage.
//!
//! Built as a `cdylib` and loaded by the page's bundle; on start it routes
//! `log` output and panics to the console, then attaches every folio
//! behavior once the document has been parsed.

use std::rc::Rc;

use folio::host::web::WebHost;
use folio::host::{Event, EventKind, Host, Target};
use folio::options::Options;
use folio::page::{self, Page};
use log::{info, warn};
use wasm_bindgen::prelude::*;

/// Module start hook.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        warn!("logger already installed");
    }

    let host =
        WebHost::new().map_err(|err| JsValue::from_str(&err.to_string()))?;
    page::install_diagnostics(&host);

    if host.document_parsed() {
        attach(&host);
    } else {
        let pending = Rc::clone(&host);
        host.listen(
            Target::Document,
            EventKind::DomContentLoaded,
            Rc::new(move |_: &Event| attach(&pending)),
        );
    }
    Ok(())
}

fn attach(host: &Rc<WebHost>) {
    let options = match page::read_inline_options(&**host) {
        Ok(Some(options)) => {
            info!("using inline options from #{}", page::OPTIONS_SCRIPT_ID);
            options
        }
        Ok(None) => Options::default(),
        Err(err) => {
            warn!("ignoring inline options: {err}");
            Options::default()
        }
    };
    // Behaviors stay alive through the listeners that reference them.
    let _ = Page::attach(host, &options);
}
