/// Anything that can be stored in a tree leaf.
///
/// `serialize` must be deterministic: two calls on logically equal values
/// must yield identical bytes, otherwise membership lookup breaks. The
/// serialized bytes double as the leaf sort key, so distinct items should
/// serialize to distinct byte strings (see the crate docs on duplicates).
pub trait Datum {
    /// Returns the canonical byte encoding of the value.
    fn serialize(&self) -> Vec<u8>;
}

impl Datum for [u8] {
    fn serialize(&self) -> Vec<u8> {
        self.to_vec()
    }
}

impl Datum for Vec<u8> {
    fn serialize(&self) -> Vec<u8> {
        self.clone()
    }
}

impl Datum for str {
    fn serialize(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl Datum for String {
    fn serialize(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl<T: Datum + ?Sized> Datum for &T {
    fn serialize(&self) -> Vec<u8> {
        (**self).serialize()
    }
}
