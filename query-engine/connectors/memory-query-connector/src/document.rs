use prisma_value::PrismaValue;

/// Key-value pairs of a stored record or of an embedded document.
pub(crate) type Document = Vec<(String, PrismaValue)>;

pub(crate) fn get<'a>(doc: &'a [(String, PrismaValue)], key: &str) -> Option<&'a PrismaValue> {
    doc.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

pub(crate) fn get_mut<'a>(doc: &'a mut Document, key: &str) -> Option<&'a mut PrismaValue> {
    doc.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
}

pub(crate) fn set(doc: &mut Document, key: &str, value: PrismaValue) {
    match get_mut(doc, key) {
        Some(existing) => *existing = value,
        None => doc.push((key.to_owned(), value)),
    }
}

pub(crate) fn remove(doc: &mut Document, key: &str) -> Option<PrismaValue> {
    let idx = doc.iter().position(|(k, _)| k == key)?;
    Some(doc.remove(idx).1)
}

/// Returns the object stored under `key`, creating an empty one when the key is missing or null.
pub(crate) fn object_entry<'a>(doc: &'a mut Document, key: &str) -> crate::Result<&'a mut Document> {
    if !matches!(get(doc, key), Some(PrismaValue::Object(_))) {
        set(doc, key, PrismaValue::Object(Vec::new()));
    }

    match get_mut(doc, key) {
        Some(PrismaValue::Object(inner)) => Ok(inner),
        _ => Err(crate::MemoryError::ConversionError {
            from: key.to_owned(),
            to: "Object".to_owned(),
        }),
    }
}

/// Returns the list stored under `key`, creating an empty one when the key is missing or null.
pub(crate) fn list_entry<'a>(doc: &'a mut Document, key: &str) -> crate::Result<&'a mut Vec<PrismaValue>> {
    if !matches!(get(doc, key), Some(PrismaValue::List(_))) {
        set(doc, key, PrismaValue::List(Vec::new()));
    }

    match get_mut(doc, key) {
        Some(PrismaValue::List(inner)) => Ok(inner),
        _ => Err(crate::MemoryError::ConversionError {
            from: key.to_owned(),
            to: "List".to_owned(),
        }),
    }
}
