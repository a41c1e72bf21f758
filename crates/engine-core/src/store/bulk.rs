use crate::{
    diagnostics::Diagnostics,
    error::{BulkWriteError, StoreError},
};

/// Hook applied to every document returned from a bulk write.
pub type PopulateFn<'a, D> = &'a (dyn Fn(D) -> D + Send + Sync);

/// Interpret the outcome of a bulk insert of `attempted` documents.
///
/// A partial failure is recovered: one warning is logged and the documents
/// that did persist are returned, populated like a fully successful batch.
/// Any other failure is logged as an error and returned to the caller.
pub fn handle_bulk_write<D>(
    outcome: Result<Vec<D>, BulkWriteError<D>>,
    attempted: usize,
    populate: Option<PopulateFn<'_, D>>,
    diagnostics: &dyn Diagnostics,
    label: &str,
) -> Result<Vec<D>, StoreError> {
    let docs = match outcome {
        Ok(docs) => docs,
        Err(BulkWriteError::Partial {
            inserted, source, ..
        }) => {
            diagnostics.log_warning(
                &format!(
                    "{label}: {} out of {attempted} documents were inserted successfully",
                    inserted.len()
                ),
                Some(&source),
            );
            inserted
        }
        Err(BulkWriteError::Failed(source)) => {
            diagnostics.log_error(
                &format!("{label}: none of the {attempted} documents were inserted"),
                Some(&source),
            );
            return Err(source);
        }
    };

    Ok(match populate {
        Some(populate) => docs.into_iter().map(populate).collect(),
        None => docs,
    })
}
