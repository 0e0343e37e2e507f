
use std::collections::HashMap;
use std::sync::Arc;

use crate::decode::{ Layout };
use crate::print::{ Syntax };

// ------------------------------------------------------------------------------------------------
// ShapeCache
// ------------------------------------------------------------------------------------------------

/// Parsed templates and mnemonics, keyed by their text. The same handful of opcodes show up
/// over and over in a run, so each one is only parsed the first time.
#[derive(Debug, Default)]
pub struct ShapeCache {
	layouts:  HashMap<String, Arc<Layout>>,
	syntaxes: HashMap<String, Arc<Syntax>>,
}

impl ShapeCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn layout(&mut self, template: &str) -> Arc<Layout> {
		if let Some(layout) = self.layouts.get(template) {
			return layout.clone();
		}

		let layout = Arc::new(Layout::parse(template));
		self.layouts.insert(template.into(), layout.clone());
		layout
	}

	pub fn syntax(&mut self, mnemonic: &str) -> Arc<Syntax> {
		if let Some(syntax) = self.syntaxes.get(mnemonic) {
			return syntax.clone();
		}

		let syntax = Arc::new(Syntax::parse(mnemonic));
		self.syntaxes.insert(mnemonic.into(), syntax.clone());
		syntax
	}

	/// How many distinct templates and mnemonics have been parsed.
	pub fn len(&self) -> (usize, usize) {
		(self.layouts.len(), self.syntaxes.len())
	}

	pub fn clear(&mut self) {
		self.layouts.clear();
		self.syntaxes.clear();
	}
}
