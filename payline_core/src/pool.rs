use crate::symbols::{Symbol, SymbolSpec};

/// Weighted multiset of symbols, each repeated by its supply weight.
///
/// The pool itself is never consumed: every [`SymbolPool::draw`] works on a
/// scratch copy, so each column samples from the full pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPool {
    symbols: Vec<Symbol>,
}

impl SymbolPool {
    pub fn from_specs(specs: &[SymbolSpec]) -> Self {
        let mut symbols = Vec::new();
        for spec in specs {
            symbols.extend(std::iter::repeat(spec.symbol).take(spec.weight as usize));
        }
        Self { symbols }
    }

    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Draws `uniforms.len()` symbols without replacement.
    ///
    /// Partial Fisher-Yates: draw `i` swaps slot `i` with a uniformly chosen
    /// slot in `i..len` and emits it. Every value in `uniforms` must lie in
    /// `[0, 1)` and there must be no more of them than pool entries.
    pub fn draw(&self, uniforms: &[f64]) -> Vec<Symbol> {
        let n = self.symbols.len();
        debug_assert!(uniforms.len() <= n, "draw exceeds pool size");
        let mut scratch = self.symbols.clone();
        let mut out = Vec::with_capacity(uniforms.len());
        for (i, u) in uniforms.iter().take(n).enumerate() {
            let remaining = n - i;
            let offset = ((u * remaining as f64).floor() as usize).min(remaining - 1);
            scratch.swap(i, i + offset);
            out.push(scratch[i]);
        }
        out
    }
}
