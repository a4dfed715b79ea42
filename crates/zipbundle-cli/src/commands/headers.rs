//! Headers command implementation.

use crate::cli::HeadersArgs;
use crate::error::add_archive_context;
use crate::output::HeadersView;
use crate::output::OutputFormatter;
use anyhow::Result;
use zipbundle_core::Disposition;
use zipbundle_core::Download;

pub fn execute(args: &HeadersArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let disposition = if args.inline {
        Disposition::Inline
    } else {
        Disposition::Attachment
    };

    let download = add_archive_context(Download::prepare(&args.archive, disposition), &args.archive)?;
    let view = HeadersView {
        path: download.path().display().to_string(),
        headers: download
            .headers()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    };

    formatter.format_headers(&view)
}
