//! Text renderers for [`StyledRun`] trees.

use super::StyledRun;

impl StyledRun {
    /// Render as legacy-coded text.
    ///
    /// Runs are visited in pre-order. Formatting is written before a run's
    /// text only when it differs from the formatting written last, so
    /// consecutive runs with the same look share one code sequence.
    ///
    /// ```
    /// use rgb_text::component::StyledRun;
    ///
    /// let run = StyledRun::from_markup("&cred &c&lbold");
    /// assert_eq!(run.to_legacy_text(), "§cred §c§lbold");
    /// ```
    #[must_use]
    pub fn to_legacy_text(&self) -> String {
        let mut out = String::new();
        self.append_legacy(&mut out, String::new());
        out
    }

    fn append_legacy(&self, out: &mut String, previous: String) -> String {
        let mut formatting = previous;
        if let Some(text) = &self.text {
            let own = self.style.to_legacy_formatting();
            if own != formatting {
                out.push_str(&own);
                formatting = own;
            }
            out.push_str(text);
        }
        for child in &self.extra {
            formatting = child.append_legacy(out, formatting);
        }
        formatting
    }

    /// Render with colors as `#RRGGBB`, followed by style codes, for every
    /// run. Nothing is elided.
    #[must_use]
    pub fn to_flat_text(&self) -> String {
        let mut out = String::new();
        self.append_flat(&mut out);
        out
    }

    fn append_flat(&self, out: &mut String) {
        out.push_str(&self.style.to_flat_formatting());
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.extra {
            child.append_flat(out);
        }
    }

    /// This run's text followed by the text of its direct children.
    ///
    /// Grandchildren are not included.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.extra {
            if let Some(text) = &child.text {
                out.push_str(text);
            }
        }
        out
    }
}
