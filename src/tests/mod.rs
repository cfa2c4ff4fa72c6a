mod console;
mod decode;
mod encoding;
mod locale;
mod prelude;
