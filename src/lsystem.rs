//! The grammar engine: loads rules, rewrites the axiom stochastically, caches every
//! iteration, and hands the result to the turtle [`Interpreter`].
//!
//! ```
//! use lsys_turtle::{LSystem, LSystemConfig};
//!
//! let mut lsystem = LSystem::with_seed(LSystemConfig::default(), 7);
//! lsystem.load_program(["F", "F -> F+F"]);
//! assert_eq!(lsystem.get_iteration(2).unwrap(), "F+F+F+F");
//! ```

use crate::error::{Error, Result};
use crate::grammar::{Derivation, Line, Productions};
use crate::interpreter::Interpreter;
use crate::presets::Preset;
use crate::skeleton::{Branch, Geometry, Skeleton};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Numeric parameters used while interpreting a derivation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LSystemConfig {
    /// Rotation applied by `+ - & ^ \ /`, in degrees.
    pub default_angle: f32,
    /// Distance covered by `F` and `f`.
    pub default_step: f32,
}

impl Default for LSystemConfig {
    fn default() -> Self {
        Self {
            default_angle: 45.0,
            default_step: 1.0,
        }
    }
}

/// A stochastic, context-free L-system with a memoized derivation history.
///
/// `R` supplies the randomness used to pick among alternative productions. Use
/// [`with_seed`](Self::with_seed) or [`with_rng`](Self::with_rng) for reproducible output.
#[derive(Clone, Debug)]
pub struct LSystem<R = ChaCha8Rng> {
    productions: Productions,
    derivation: Derivation,
    config: LSystemConfig,
    rng: R,
}

impl LSystem<ChaCha8Rng> {
    /// Creates an engine seeded from system entropy.
    pub fn new(config: LSystemConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Creates an engine whose rule choices are fully determined by `seed`.
    pub fn with_seed(config: LSystemConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for LSystem<ChaCha8Rng> {
    fn default() -> Self {
        Self::new(LSystemConfig::default())
    }
}

impl<R: Rng> LSystem<R> {
    pub fn with_rng(config: LSystemConfig, rng: R) -> Self {
        Self {
            productions: Productions::new(),
            derivation: Derivation::new(),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &LSystemConfig {
        &self.config
    }

    pub fn productions(&self) -> &Productions {
        &self.productions
    }

    pub fn derivation(&self) -> &Derivation {
        &self.derivation
    }

    pub fn set_default_angle(&mut self, degrees: f32) {
        self.config.default_angle = degrees;
    }

    pub fn set_default_step(&mut self, distance: f32) {
        self.config.default_step = distance;
    }

    /// Drops all rules and cached derivations.
    pub fn reset(&mut self) {
        self.derivation.clear();
        self.productions.clear();
    }

    /// Adds one configuration line: a `key->replacement` rule or an axiom.
    ///
    /// Spaces are ignored and blank lines do nothing. A rule appends a new alternative
    /// to its key. An axiom replaces the working string and is appended to the cache,
    /// so only the first axiom after a reset becomes iteration 0.
    pub fn add_production(&mut self, line: &str) {
        match Line::parse(line) {
            Some(Line::Rule { key, replacement }) => self.productions.push(key, replacement),
            Some(Line::Axiom(axiom)) => self.derivation.set_axiom(axiom),
            None => trace!(line, "ignoring blank grammar line"),
        }
    }

    /// Resets the engine, then adds every line in order.
    pub fn load_program<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.reset();
        for line in lines {
            self.add_production(line.as_ref());
        }
        debug!(
            rules = self.productions.len(),
            axiom = self.derivation.get(0).unwrap_or_default(),
            "loaded grammar"
        );
    }

    /// Loads newline-separated grammar text, as typed into a multi-line editor.
    pub fn load_source(&mut self, source: &str) {
        self.load_program(source.split('\n'));
    }

    /// Loads one of the built-in grammars.
    pub fn load_preset(&mut self, preset: Preset) {
        self.load_program(preset.lines());
    }

    /// Performs a single rewrite pass over `input`.
    ///
    /// Every character that is a rule key is replaced by one of its alternatives,
    /// chosen uniformly and independently per occurrence. Other characters are copied.
    pub fn iterate(&mut self, input: &str) -> Result<String> {
        rewrite(&self.productions, &mut self.rng, input)
    }

    /// Returns the derivation after `n` rewrite passes.
    ///
    /// Missing iterations are computed from the latest cached string and kept; indices
    /// already in the cache are returned without rewriting.
    pub fn get_iteration(&mut self, n: usize) -> Result<&str> {
        let cached = self.derivation.len();
        if n >= cached {
            for _ in cached..=n {
                let next = rewrite(&self.productions, &mut self.rng, self.derivation.current())?;
                self.derivation.push_rewrite(next);
            }
            debug!(
                from = cached,
                to = n,
                len = self.derivation.current().len(),
                "extended derivation cache"
            );
        }

        // The loop above guarantees index `n` exists.
        Ok(self.derivation.get(n).unwrap_or_default())
    }

    /// Derives iteration `n` and interprets it with a fresh turtle.
    ///
    /// Branches and markers are appended to the caller's lists, which are not cleared.
    pub fn process(
        &mut self,
        n: usize,
        branches: &mut Vec<Branch>,
        geometry: &mut Vec<Geometry>,
    ) -> Result<()> {
        let LSystemConfig {
            default_angle,
            default_step,
        } = self.config;
        let insn = self.get_iteration(n)?;

        Interpreter::new(default_angle, default_step).run(insn, branches, geometry)
    }

    /// Like [`process`](Self::process), collecting the output into a new [`Skeleton`].
    pub fn generate(&mut self, n: usize) -> Result<Skeleton> {
        let mut skeleton = Skeleton::new();
        self.process(n, &mut skeleton.branches, &mut skeleton.geometry)?;
        Ok(skeleton)
    }
}

fn rewrite<R: Rng>(productions: &Productions, rng: &mut R, input: &str) -> Result<String> {
    let mut output = String::with_capacity(input.len());
    let mut buf = [0u8; 4];

    for sym in input.chars() {
        let key: &str = sym.encode_utf8(&mut buf);
        match productions.alternatives(key) {
            Some([]) => {
                return Err(Error::EmptyProduction {
                    symbol: key.to_owned(),
                });
            }
            Some(alternatives) => {
                let idx = pick(rng, alternatives.len());
                output.push_str(&alternatives[idx]);
            }
            None => output.push(sym),
        }
    }

    Ok(output)
}

// floor(u * count) with u in [0, 1); clamped since f64 rounding can reach `count`.
fn pick<R: Rng>(rng: &mut R, count: usize) -> usize {
    let u: f64 = rng.r#gen();
    ((u * count as f64) as usize).min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn deterministic(lines: &[&str]) -> LSystem {
        let mut lsystem = LSystem::with_seed(LSystemConfig::default(), 0);
        lsystem.load_program(lines);
        lsystem
    }

    #[test]
    fn single_alternative_rules_are_deterministic() {
        let mut lsystem = deterministic(&["F", "F -> F+F"]);

        assert_eq!(lsystem.get_iteration(0).unwrap(), "F");
        assert_eq!(lsystem.get_iteration(1).unwrap(), "F+F");
        assert_eq!(lsystem.get_iteration(2).unwrap(), "F+F+F+F");
    }

    #[test]
    fn cache_hits_do_not_rewrite() {
        let mut lsystem = deterministic(&["F", "F -> F+F"]);

        lsystem.get_iteration(3).unwrap();
        assert_eq!(lsystem.derivation().rewrite_passes(), 3);
        lsystem.get_iteration(1).unwrap();
        lsystem.get_iteration(3).unwrap();
        assert_eq!(lsystem.derivation().rewrite_passes(), 3);
        assert_eq!(lsystem.derivation().len(), 4);
    }

    #[test]
    fn missing_axiom_derives_from_empty_string() {
        let mut lsystem = deterministic(&["F -> FF"]);

        assert_eq!(lsystem.get_iteration(2).unwrap(), "");
        assert_eq!(lsystem.derivation().rewrite_passes(), 3);
    }

    #[test]
    fn second_axiom_shifts_cache_indices() {
        let mut lsystem = deterministic(&["A", "B", "A -> x", "B -> y"]);

        assert_eq!(lsystem.get_iteration(0).unwrap(), "A");
        assert_eq!(lsystem.get_iteration(1).unwrap(), "B");
        assert_eq!(lsystem.get_iteration(2).unwrap(), "y");
    }

    #[test]
    fn multi_character_keys_never_match() {
        let mut lsystem = deterministic(&["AB", "AB -> X"]);

        assert!(lsystem.productions().contains("AB"));
        assert_eq!(lsystem.get_iteration(1).unwrap(), "AB");
    }

    #[test]
    fn unicode_symbols_are_rewritten() {
        let mut lsystem = deterministic(&["∧é", "∧ -> ü"]);
        assert_eq!(lsystem.get_iteration(1).unwrap(), "üé");
    }

    #[test]
    fn empty_replacement_erases_symbol() {
        let mut lsystem = deterministic(&["AXA", "X ->"]);
        assert_eq!(lsystem.get_iteration(1).unwrap(), "AA");
    }

    #[test]
    fn reset_clears_rules_and_cache() {
        let mut lsystem = deterministic(&["F", "F -> FF"]);
        lsystem.get_iteration(2).unwrap();

        lsystem.reset();
        assert!(lsystem.productions().is_empty());
        assert!(lsystem.derivation().is_empty());
        lsystem.reset();
        assert!(lsystem.derivation().is_empty());
    }

    #[test]
    fn load_program_replaces_previous_grammar() {
        let mut lsystem = deterministic(&["F", "F -> FF"]);
        lsystem.get_iteration(1).unwrap();

        lsystem.load_program(["G", "G -> GH"]);
        assert!(!lsystem.productions().contains("F"));
        assert_eq!(lsystem.get_iteration(1).unwrap(), "GH");
    }

    #[test]
    fn load_source_splits_lines() {
        let mut lsystem = LSystem::with_seed(LSystemConfig::default(), 0);
        lsystem.load_source("F \n F->F[+F]F[-F]F\r\n\n");

        assert_eq!(lsystem.get_iteration(1).unwrap(), "F[+F]F[-F]F");
    }

    #[test]
    fn empty_alternative_list_is_a_configuration_error() {
        let mut lsystem = LSystem::with_seed(LSystemConfig::default(), 0);
        lsystem.productions.insert_empty("F");

        let err = lsystem.iterate("AF").unwrap_err();
        assert!(matches!(err, Error::EmptyProduction { symbol } if symbol == "F"));
    }

    #[test]
    fn selection_follows_uniform_sample() {
        // StepRng yields a fixed u64, so every sample maps to the same alternative.
        let high = StepRng::new(u64::MAX, 0);
        let mut lsystem = LSystem::with_rng(LSystemConfig::default(), high);
        lsystem.load_program(["A", "A -> x", "A -> y", "A -> z"]);
        assert_eq!(lsystem.get_iteration(1).unwrap(), "z");

        let low = StepRng::new(0, 0);
        let mut lsystem = LSystem::with_rng(LSystemConfig::default(), low);
        lsystem.load_program(["AA", "A -> x", "A -> y", "A -> z"]);
        assert_eq!(lsystem.get_iteration(1).unwrap(), "xx");
    }

    #[test]
    fn setters_overwrite_config() {
        let mut lsystem = deterministic(&["F"]);
        lsystem.set_default_angle(-30.0);
        lsystem.set_default_step(0.0);

        assert_eq!(
            *lsystem.config(),
            LSystemConfig {
                default_angle: -30.0,
                default_step: 0.0
            }
        );
    }
}
