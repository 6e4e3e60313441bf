/// Kind-to-color table for the renderer, with a fallback for any kind the
/// table was never given.
#[derive(Clone, Debug)]
pub struct Palette<K> {
    entries: Vec<(K, [u8; 3])>,
    fallback: [u8; 3],
}

impl<K: Copy + PartialEq> Palette<K> {
    pub fn new(fallback: [u8; 3]) -> Self {
        Self {
            entries: Vec::new(),
            fallback,
        }
    }

    pub fn with(mut self, kind: K, rgb: [u8; 3]) -> Self {
        self.entries.push((kind, rgb));
        self
    }

    pub fn color(&self, kind: K) -> [u8; 3] {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == kind)
            .map(|(_, rgb)| *rgb)
            .unwrap_or(self.fallback)
    }

    pub fn color_rgba(&self, kind: K) -> [u8; 4] {
        let [r, g, b] = self.color(kind);
        [r, g, b, 0xff]
    }
}
