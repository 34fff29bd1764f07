//! In-scope namespace declarations while rendering.

/// A stack of namespace declaration frames, one per open element.
///
/// `None` as a prefix stands for the default namespace.
#[derive(Debug, Clone, Default)]
pub(crate) struct NamespaceScope {
    frames: Vec<Vec<(Option<String>, String)>>,
    generated: usize,
}

impl NamespaceScope {
    pub fn new() -> Self {
        Self {
            frames: vec![Vec::new()],
            generated: 0,
        }
    }

    pub fn push(&mut self) {
        self.frames.push(Vec::new());
    }

    pub fn pop(&mut self) {
        // The outermost frame holds the seeded declarations and is never popped
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Records a declaration in the innermost frame.
    pub fn declare(&mut self, prefix: Option<&str>, namespace: &str) {
        if self.frames.is_empty() {
            self.frames.push(Vec::new());
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.push((prefix.map(str::to_owned), namespace.to_owned()));
        }
    }

    /// Records a declaration given as an attribute (`xmlns` or `xmlns:p`).
    ///
    /// Returns false if the attribute is not a namespace declaration.
    pub fn declare_attribute(&mut self, name: &str, value: &str) -> bool {
        if name == "xmlns" {
            self.declare(None, value);
            true
        } else if let Some(prefix) = name.strip_prefix("xmlns:") {
            self.declare(Some(prefix), value);
            true
        } else {
            false
        }
    }

    /// Namespace bound to `prefix`, innermost declaration first.
    pub fn namespace_of(&self, prefix: Option<&str>) -> Option<&str> {
        if prefix == Some("xml") {
            return Some(super::XML_NS);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, ns)| ns.as_str())
    }

    pub fn default_namespace(&self) -> &str {
        self.namespace_of(None).unwrap_or_default()
    }

    /// Prefix currently bound to `namespace`.
    ///
    /// `Some(None)` means the namespace is the default one. Prefixes shadowed
    /// by a later declaration are skipped.
    pub fn prefix_of(&self, namespace: &str) -> Option<Option<&str>> {
        if namespace == super::XML_NS {
            return Some(Some("xml"));
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .filter(|(_, ns)| ns == namespace)
            .map(|(p, _)| p.as_deref())
            .find(|p| self.namespace_of(*p) == Some(namespace))
    }

    /// Returns a fresh prefix that is not bound in any frame.
    pub fn generate_prefix(&mut self) -> String {
        loop {
            self.generated += 1;
            let candidate = format!("ns{}", self.generated);
            if self.namespace_of(Some(candidate.as_str())).is_none() {
                return candidate;
            }
        }
    }
}
