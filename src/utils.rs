use encoding_rs::WINDOWS_1252;
use lopdf::{Dictionary, Document, Object, Stream};
use tracing::warn;

/// Decode literal string bytes with the generator's single-byte baseline
/// encoding. ASCII passes through unchanged.
pub(crate) fn decode_literal(s: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(s);
    text.into_owned()
}

pub(crate) fn maybe_deref<'a>(doc: &'a Document, o: &'a Object) -> Option<&'a Object> {
    match o {
        &Object::Reference(r) => doc.get_object(r).ok(),
        _ => Some(o),
    }
}

pub(crate) fn maybe_get_obj<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    dict.get(key).ok().and_then(|o| maybe_deref(doc, o))
}

pub(crate) trait FromObj<'a>
where
    Self: std::marker::Sized,
{
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Option<Self>;
}

impl<'a> FromObj<'a> for &'a Dictionary {
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
        maybe_deref(doc, obj)?.as_dict().ok()
    }
}

impl<'a> FromObj<'a> for &'a Stream {
    fn from_obj(doc: &'a Document, obj: &'a Object) -> Option<&'a Stream> {
        maybe_deref(doc, obj)?.as_stream().ok()
    }
}

pub(crate) fn maybe_get<'a, T: FromObj<'a>>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<T> {
    maybe_get_obj(doc, dict, key).and_then(|o| T::from_obj(doc, o))
}

/// Look `key` up on a page dictionary, falling back to its ancestors in the
/// page tree.
pub(crate) fn get_inherited<'a, T: FromObj<'a>>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<T> {
    if let Some(o) = maybe_get(doc, dict, key) {
        return Some(o);
    }
    let parent = dict
        .get(b"Parent")
        .and_then(|parent| parent.as_reference())
        .and_then(|id| doc.get_dictionary(id))
        .ok()?;
    get_inherited(doc, parent, key)
}

pub(crate) fn get_contents(contents: &Stream) -> Vec<u8> {
    if contents.filters().is_ok() {
        contents.decompressed_content().unwrap_or_else(|e| {
            warn!("failed to decompress stream, using raw bytes: {}", e);
            contents.content.clone()
        })
    } else {
        contents.content.clone()
    }
}
