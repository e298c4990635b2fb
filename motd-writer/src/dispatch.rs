use std::{fs::OpenOptions, io::Write, path::Path};

use log::{debug, warn};

use crate::{Error, Outcome};

/// Send the message where the config says: `out` for a preview, the
/// motd file otherwise.
pub(crate) fn dispatch<W: Write>(
    message: &str,
    preview: bool,
    motd_path: &Path,
    out: &mut W,
) -> Outcome {
    if preview {
        if let Err(e) = writeln!(out, "{}", message).and_then(|_| out.flush()) {
            warn!("printing preview: {:?}", e);
        }
        return Outcome::Preview;
    }

    match write_motd(motd_path, message) {
        Ok(()) => Outcome::Written,
        Err(e) => {
            debug!("{}: {:?}", e, std::error::Error::source(&e));
            match e {
                Error::Open { .. } => Outcome::OpenError(e),
                Error::Write { .. } => Outcome::WriteError(e),
            }
        }
    }
}

/// Write `message` at the start of the existing file at `path`.
///
/// The file is opened write-only and is neither created nor truncated,
/// so bytes past the end of `message` keep whatever they held before.
pub fn write_motd(path: &Path, message: &str) -> Result<(), Error> {
    let mut file = OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

    file.write_all(message.as_bytes()).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("wrote {} bytes to {:?}", message.len(), path);
    Ok(())
}
