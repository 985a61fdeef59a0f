// ABOUTME: Tag-wide attribute rewriting: strip named attributes or set attributes on every matching element.
// ABOUTME: Both operations are idempotent and silently do nothing when no element matches.

use super::tree::Document;

/// Remove each named attribute from every `tag` element that carries it.
///
/// Returns how many attributes were actually removed.
pub fn remove_attributes<S: AsRef<str>>(doc: &mut Document, tag: &str, names: &[S]) -> usize {
    let mut removed = 0;
    for id in doc.query_by_tag_name(tag) {
        let Some(el) = doc.element_mut(id) else {
            continue;
        };
        for name in names {
            if el.remove_attr(name.as_ref()).is_some() {
                removed += 1;
            }
        }
    }
    removed
}

/// Set attributes on every `tag` element.
///
/// Each attribute's values are written in sequence, so the last one wins.
/// Returns how many elements were touched.
pub fn add_attributes<K, V>(doc: &mut Document, tag: &str, attributes: &[(K, Vec<V>)]) -> usize
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let targets = doc.query_by_tag_name(tag);
    for id in &targets {
        let Some(el) = doc.element_mut(*id) else {
            continue;
        };
        for (name, values) in attributes {
            for value in values {
                el.set_attr(name.as_ref(), value.as_ref());
            }
        }
    }
    targets.len()
}
