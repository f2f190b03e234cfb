//! JSON diagnostic view of cells.
//!
//! Rendering never resolves a payload: blobs and wrappers are summarized by
//! type and size/address. The output is deterministic for equal inputs.

use serde_json::{json, Value};

use crate::cell::DataCell;

/// Converts a cell into a JSON value for logs and diagnostics.
pub fn cell_to_json(cell: &DataCell) -> Value {
    match cell {
        DataCell::Missing => json!({ "missing": true }),
        DataCell::Int(v) => json!(v),
        DataCell::Double(v) => json!(v),
        DataCell::Str(v) => json!(v),
        DataCell::Blob(blob) => json!({
            "type": blob.blob_type().name(),
            "size": blob.size(),
        }),
        DataCell::BlobWrapper(wrapper) => {
            let mut obj = json!({
                "type": wrapper.blob_type().name(),
                "deferred": true,
            });
            if let Some(address) = wrapper.address() {
                obj["address"] = json!(address.0);
            }
            obj
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::{BlobCell, BlobWrapperCell};
    use crate::types::DataType;

    #[test]
    fn plain_cells_render_natively() {
        assert_eq!(cell_to_json(&DataCell::from(5i64)), json!(5));
        assert_eq!(cell_to_json(&DataCell::from("x")), json!("x"));
        assert_eq!(cell_to_json(&DataCell::Missing), json!({ "missing": true }));
    }

    #[test]
    fn blob_renders_as_summary() {
        let blob = BlobCell::new(DataType::Image, vec![0; 32]);
        assert_eq!(
            cell_to_json(&DataCell::Blob(blob.clone())),
            json!({ "type": "image", "size": 32 })
        );
        assert_eq!(
            cell_to_json(&DataCell::BlobWrapper(BlobWrapperCell::wrap(blob))),
            json!({ "type": "image", "deferred": true })
        );
    }
}
