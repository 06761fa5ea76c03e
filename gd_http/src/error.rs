use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterfaceError {
  /// The interface could not be reached, even after retrying.
  #[error(
    "could not connect to the GDMC HTTP interface at {host}: {err}. is minecraft running with the \
     GDMC HTTP mod installed?"
  )]
  Connection {
    host: String,
    #[source]
    err:  ureq::Transport,
  },
  #[error("the GDMC HTTP interface reported an internal server error (500)")]
  Internal,
  #[error("the GDMC HTTP interface responded with status {code}: {body}")]
  Status { code: u16, body: String },
  #[error("the build area is not set (set it in-game with /setbuildarea)")]
  BuildAreaNotSet,
  #[error("could not read response: {0}")]
  IO(#[from] io::Error),
  #[error("invalid json response: {0}")]
  Json(#[from] serde_json::Error),
}
