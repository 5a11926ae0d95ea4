//! Decorative floating math glyphs behind the hero section.
//!
//! The stylesheet animates `.academic-symbol` elements; this module only
//! creates them with a random glyph, position, size and tilt, and every
//! few seconds nudges a random subset to a new position and size.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::host::{Host, MediaQuery, NodeId, Selector};
use crate::options::SymbolOptions;

/// Id of the container the glyphs are appended to.
pub const CONTAINER_ID: &str = "academicSymbols";
/// Class of each glyph element.
pub const SYMBOL_CLASS: &str = "academic-symbol";

/// Glyphs a symbol is drawn from.
pub const PALETTE: &[&str] = &[
    "∑", "π", "∫", "Ω", "α", "β", "γ", "δ", "ε", "ζ", "η", "θ", "λ", "μ", "ν",
    "ξ", "ρ", "σ", "τ", "φ", "χ", "ψ", "ω", "∇", "∂", "∏", "±", "×", "÷", "√",
    "∝", "∈", "∉", "⊂", "⊃", "∪", "∩", "∅", "∀", "∃", "¬", "∧", "∨", "→", "↔",
    "ℝ", "ℂ", "ℕ", "ℤ", "ℚ", "ℙ", "ℍ", "𝕊", "𝔸", "𝔹", "ℰ", "ℱ", "𝒢", "ℋ",
    "ℐ", "𝒥", "𝒦", "ℒ", "ℳ", "𝒩", "𝒪", "𝒫", "𝒬", "ℛ", "𝒮", "𝒯", "𝒰", "𝒱",
    "𝒲", "𝒳", "𝒴", "𝒵",
];

/// Generator of the decorative symbol field.
pub struct AcademicSymbolsManager<H: Host> {
    host: Rc<H>,
    container: NodeId,
    rng: RefCell<StdRng>,
    options: SymbolOptions,
}

impl<H: Host> fmt::Debug for AcademicSymbolsManager<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcademicSymbolsManager")
            .field("container", &self.container)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<H: Host + 'static> AcademicSymbolsManager<H> {
    /// Fill `#academicSymbols` and start the periodic reposition pass.
    ///
    /// Does nothing (and returns `None`) when the container is missing or
    /// the visitor prefers reduced motion.
    pub fn attach(
        host: &Rc<H>,
        options: &SymbolOptions,
        rng: StdRng,
    ) -> Option<Rc<Self>> {
        let Some(container) = host.element_by_id(CONTAINER_ID) else {
            debug!("no #{CONTAINER_ID}; symbol field skipped");
            return None;
        };
        if host.media_matches(MediaQuery::PrefersReducedMotion) {
            debug!("reduced motion preferred; symbol field skipped");
            return None;
        }

        let manager = Rc::new(Self {
            host: Rc::clone(host),
            container,
            rng: RefCell::new(rng),
            options: options.clone(),
        });
        let created = manager.create_symbols();
        debug!("created {created} academic symbols");

        let this = Rc::clone(&manager);
        host.set_interval(
            options.reposition_interval(),
            Rc::new(move || {
                let _ = this.reshuffle();
            }),
        );
        Some(manager)
    }

    fn create_symbols(&self) -> usize {
        let mut rng = self.rng.borrow_mut();
        let mut created = 0;
        for _ in 0..self.options.count {
            let Some(symbol) = self.host.create_element("div") else {
                break;
            };
            self.host.add_class(symbol, SYMBOL_CLASS);
            let glyph = PALETTE[rng.random_range(0..PALETTE.len())];
            self.host.set_text_content(symbol, glyph);
            self.place(symbol, &mut rng);
            let tilt = rng.random::<f64>() * 360.0;
            self.host
                .set_style(symbol, "transform", &format!("rotate({tilt}deg)"));
            self.host.append_child(self.container, symbol);
            created += 1;
        }
        created
    }

    /// Give each glyph currently in the container a chance to jump to a new
    /// position and size. Tilt is kept. Returns how many moved.
    pub fn reshuffle(&self) -> usize {
        let mut rng = self.rng.borrow_mut();
        let mut moved = 0;
        let symbols = self
            .host
            .query_all_in(self.container, &Selector::class(SYMBOL_CLASS));
        for symbol in symbols {
            if rng.random::<f64>() < self.options.reposition_probability {
                self.place(symbol, &mut rng);
                moved += 1;
            }
        }
        moved
    }

    fn place(&self, symbol: NodeId, rng: &mut StdRng) {
        let left = rng.random::<f64>() * 100.0;
        let size = self.options.min_font_rem
            + rng.random::<f64>() * self.options.font_spread_rem;
        self.host.set_style(symbol, "left", &format!("{left}%"));
        self.host.set_style(symbol, "font-size", &format!("{size}rem"));
    }
}
