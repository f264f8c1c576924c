//! Output helpers for the binaries.

/// Create a directory and all its parents, evaluating to
/// `std::io::Result<()>`.
#[macro_export]
macro_rules! mkdir {
    ( $dir:expr ) => {
        std::fs::create_dir_all(&$dir)
    }
}

/// Write a set of named arrays to a `.npz` file, evaluating to
/// `Result<(), ndarray_npy::WriteNpzError>`.
///
/// ```ignore
/// write_npz!(
///     outdir.join("data.npz"),
///     arrays: {
///         "t" => &t,
///         "d" => &d,
///     }
/// )?;
/// ```
#[macro_export]
macro_rules! write_npz {
    (
        $filename:expr,
        arrays: { $( $name:expr => $array:expr ),+ $(,)? } $(,)?
    ) => {
        (|| -> Result<(), ndarray_npy::WriteNpzError> {
            let mut npz
                = ndarray_npy::NpzWriter::new(std::fs::File::create($filename)
                    .map_err(ndarray_npy::WriteNpyError::from)?);
            $( npz.add_array($name, $array)?; )+
            npz.finish()?;
            Ok(())
        })()
    }
}
