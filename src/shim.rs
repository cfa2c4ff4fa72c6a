//! The process-wide shim context and its one-time setup.

use std::fs;
use std::time::UNIX_EPOCH;

use crate::argv;
use crate::convert::Value;
use crate::decode::LocalDecoder;
use crate::encoding;
use crate::errors::{Error, Result};
use crate::fsops;
use crate::output::{self, Stream};
use crate::path;
use crate::registry::Registry;

/// Shim configuration. The defaults need no configuration file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Route interactive console output through the raw writer.
    pub raw_console: bool,
    /// Largest single OS write handed to the console.
    pub write_chunk: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raw_console: true,
            write_chunk: crate::console::WRITE_CHUNK,
        }
    }
}

/// The explicit context every boundary crossing goes through: the decoder
/// memo, the operation registry, and the output routing. Lifetime is tied to
/// the host session; there is no implicit global state.
pub struct Shim {
    config: Config,
    decoder: LocalDecoder,
    registry: Registry,
}

impl Shim {
    /// Build the context and register the standard operation set. This is
    /// the one composition step; nothing is patched afterwards.
    pub fn new(config: Config) -> Self {
        Self::with_decoder(config, LocalDecoder::for_locale())
    }

    /// Like [`Shim::new`], but with a host-supplied from-locale primitive.
    pub fn with_decoder(config: Config, decoder: LocalDecoder) -> Self {
        let mut registry = Registry::new();
        register_path_ops(&mut registry);
        register_fs_ops(&mut registry);
        log::debug!("utf8 boundary registry initialized");
        Shim {
            config,
            decoder,
            registry,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn decoder_mut(&mut self) -> &mut LocalDecoder {
        &mut self.decoder
    }

    /// The command line after the program name, canonical and memoized.
    pub fn argv(&mut self) -> Result<Vec<Vec<u8>>> {
        argv::utf8_argv(&mut self.decoder)
    }

    /// Decode a native-locale string, at most once.
    pub fn decode_local(&mut self, s: &[u8]) -> Result<Vec<u8>> {
        self.decoder.decode(s)
    }

    /// Convert a host value to native form, remembering every produced byte
    /// string so a later locale decode leaves it alone.
    pub fn to_native(&mut self, value: Value) -> Result<Value> {
        let value = encoding::to_native(value)?;
        let decoder = &mut self.decoder;
        value.for_each_bytes(&mut |b| decoder.mark_canonical(b));
        Ok(value)
    }

    /// The host's write hook. A real console takes the raw write path;
    /// redirected output is encoded for the locale and written through.
    pub fn write_text(&mut self, stream: Stream, text: &str) -> Result<()> {
        if self.config.raw_console && output::console_attached(stream) {
            output::write_console_text(stream, text, self.config.write_chunk)
        } else {
            output::write_native(stream, text)
        }
    }
}

fn text_arg<'a>(args: &'a [Value], idx: usize) -> Result<&'a str> {
    match args.get(idx) {
        Some(Value::Text(s)) => Ok(s),
        _ => Err(Error::Argument("expected a text argument")),
    }
}

fn int_arg(args: &[Value], idx: usize) -> Result<i64> {
    match args.get(idx) {
        Some(Value::Int(n)) => Ok(*n),
        _ => Err(Error::Argument("expected an integer argument")),
    }
}

fn stat_value(stat: &fs::Metadata) -> Value {
    #[cfg(unix)]
    let mode = {
        use std::os::unix::fs::PermissionsExt;
        stat.permissions().mode() as i64
    };
    #[cfg(not(unix))]
    let mode = if stat.permissions().readonly() {
        0o444
    } else {
        0o666
    };
    let mtime = stat
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    Value::Tuple(vec![
        Value::Int(mode),
        Value::Int(stat.len() as i64),
        Value::Int(mtime),
    ])
}

fn register_path_ops(registry: &mut Registry) {
    registry.install(
        "path.join",
        Box::new(|args, _| {
            Ok(Value::text(path::join(
                text_arg(&args, 0)?,
                text_arg(&args, 1)?,
            )))
        }),
    );
    registry.install(
        "path.split",
        Box::new(|args, _| {
            let (dir, name) = path::split(text_arg(&args, 0)?);
            Ok(Value::Tuple(vec![Value::text(dir), Value::text(name)]))
        }),
    );
    registry.install(
        "path.splitext",
        Box::new(|args, _| {
            let (stem, ext) = path::split_ext(text_arg(&args, 0)?);
            Ok(Value::Tuple(vec![Value::text(stem), Value::text(ext)]))
        }),
    );
    registry.install(
        "path.dirname",
        Box::new(|args, _| Ok(Value::text(path::dirname(text_arg(&args, 0)?)))),
    );
    registry.install(
        "path.normpath",
        Box::new(|args, _| Ok(Value::text(path::normalize(text_arg(&args, 0)?, false)))),
    );
    registry.install(
        "path.normcase",
        Box::new(|args, _| Ok(Value::text(path::normcase(text_arg(&args, 0)?)))),
    );
    registry.install(
        "path.exists",
        Box::new(|args, _| Ok(Value::Bool(fsops::exists(text_arg(&args, 0)?)))),
    );
    registry.install(
        "path.isdir",
        Box::new(|args, _| Ok(Value::Bool(fsops::is_dir(text_arg(&args, 0)?)))),
    );
    registry.install(
        "path.islink",
        Box::new(|args, _| Ok(Value::Bool(fsops::is_symlink(text_arg(&args, 0)?)))),
    );
}

fn register_fs_ops(registry: &mut Registry) {
    registry.install(
        "os.stat",
        Box::new(|args, _| Ok(stat_value(&fsops::stat(text_arg(&args, 0)?)?))),
    );
    registry.install(
        "os.lstat",
        Box::new(|args, _| Ok(stat_value(&fsops::lstat(text_arg(&args, 0)?)?))),
    );
    registry.install(
        "os.unlink",
        Box::new(|args, _| {
            fsops::unlink(text_arg(&args, 0)?)?;
            Ok(Value::Null)
        }),
    );
    registry.install(
        "os.rename",
        Box::new(|args, _| {
            fsops::rename(text_arg(&args, 0)?, text_arg(&args, 1)?)?;
            Ok(Value::Null)
        }),
    );
    registry.install(
        "os.mkdir",
        Box::new(|args, _| {
            fsops::mkdir(text_arg(&args, 0)?)?;
            Ok(Value::Null)
        }),
    );
    registry.install(
        "os.makedirs",
        Box::new(|args, _| {
            fsops::makedirs(text_arg(&args, 0)?)?;
            Ok(Value::Null)
        }),
    );
    registry.install(
        "os.removedirs",
        Box::new(|args, _| {
            fsops::removedirs(text_arg(&args, 0)?)?;
            Ok(Value::Null)
        }),
    );
    registry.install(
        "os.chmod",
        Box::new(|args, _| {
            fsops::chmod(text_arg(&args, 0)?, int_arg(&args, 1)? as u32)?;
            Ok(Value::Null)
        }),
    );
    registry.install(
        "os.getcwd",
        Box::new(|_, _| Ok(Value::text(fsops::getcwd()?))),
    );
    registry.install(
        "util.copyfile",
        Box::new(|args, _| {
            fsops::copy_file(text_arg(&args, 0)?, text_arg(&args, 1)?)?;
            Ok(Value::Null)
        }),
    );
    registry.install(
        "util.copymode",
        Box::new(|args, _| {
            fsops::copy_mode(text_arg(&args, 0)?, text_arg(&args, 1)?)?;
            Ok(Value::Null)
        }),
    );
    registry.install(
        "osutil.listdir",
        Box::new(|args, _| {
            let path = text_arg(&args, 0)?;
            let want_stat = matches!(args.get(1), Some(Value::Bool(true)));
            let skip = match args.get(2) {
                Some(Value::Text(s)) => Some(s.as_str()),
                _ => None,
            };
            let entries = fsops::listdir(path, want_stat, skip)?;
            let rows = entries
                .into_iter()
                .map(|entry| {
                    let mut row = vec![
                        Value::text(entry.name),
                        Value::Int(entry.kind.mode_bits()),
                    ];
                    if let Some(stat) = &entry.stat {
                        row.push(stat_value(stat));
                    }
                    Value::Tuple(row)
                })
                .collect();
            Ok(Value::List(rows))
        }),
    );
}
