use crate::{build_area::BuildAreaResponse, BuildArea, InterfaceError};
use gd_common::{math::Rect, Config};
use gd_world::ChunkSource;
use std::{io::Read, thread, time::Duration};

pub const DEFAULT_HOST: &str = "http://localhost:9000";

/// A connection to the GDMC HTTP interface. No connection is made until a
/// request is sent.
#[derive(Debug, Clone)]
pub struct Interface {
  host:        String,
  dimension:   Option<String>,
  retries:     u32,
  retry_delay: Duration,
  agent:       ureq::Agent,
}

impl Default for Interface {
  fn default() -> Self { Interface::new(DEFAULT_HOST) }
}

impl Interface {
  pub fn new(host: impl Into<String>) -> Self {
    Interface {
      host:        host.into().trim_end_matches('/').into(),
      dimension:   None,
      retries:     0,
      retry_delay: Duration::from_secs(3),
      agent:       ureq::AgentBuilder::new().build(),
    }
  }

  /// Creates an interface with the host, retries, timeout and dimension from
  /// the config.
  pub fn from_config(config: &Config) -> Self {
    let mut agent = ureq::AgentBuilder::new();
    if let Some(timeout) = config.timeout() {
      agent = agent.timeout(timeout);
    }
    Interface {
      host:        config.host.trim_end_matches('/').into(),
      dimension:   config.dimension.clone(),
      retries:     config.retries,
      retry_delay: config.retry_delay(),
      agent:       agent.build(),
    }
  }

  /// Sets the number of times a request is retried after a connection error,
  /// and how long to wait between each attempt.
  pub fn with_retries(mut self, retries: u32, delay: Duration) -> Self {
    self.retries = retries;
    self.retry_delay = delay;
    self
  }
  /// Sets the dimension that chunks are read from.
  pub fn with_dimension(mut self, dimension: impl Into<String>) -> Self {
    self.dimension = Some(dimension.into());
    self
  }

  pub fn host(&self) -> &str { &self.host }
  pub fn dimension(&self) -> Option<&str> { self.dimension.as_deref() }

  /// Sends a GET request. Connection errors are retried, but any response from
  /// the server (even an error status) is returned immediately.
  fn get(
    &self,
    path: &str,
    query: &[(&str, String)],
    accept: Option<&str>,
  ) -> Result<ureq::Response, InterfaceError> {
    let url = format!("{}/{path}", self.host);
    let mut retries_left = self.retries;
    loop {
      let mut req = self.agent.get(&url);
      for (k, v) in query {
        req = req.query(k, v);
      }
      if let Some(accept) = accept {
        req = req.set("Accept", accept);
      }
      debug!("GET {url} {query:?}");
      match req.call() {
        Ok(res) => return Ok(res),
        Err(ureq::Error::Status(500, _)) => return Err(InterfaceError::Internal),
        Err(ureq::Error::Status(code, res)) => {
          return Err(InterfaceError::Status { code, body: res.into_string().unwrap_or_default() })
        }
        Err(ureq::Error::Transport(err)) => {
          if retries_left == 0 {
            return Err(InterfaceError::Connection { host: self.host.clone(), err });
          }
          warn!(
            "request to {url} failed: {err}. retrying in {:?} ({retries_left} retries left)",
            self.retry_delay
          );
          retries_left -= 1;
          thread::sleep(self.retry_delay);
        }
      }
    }
  }

  /// Returns the raw nbt for the given rect of chunks. The result is a
  /// compound with a `Chunks` list, ordered X first, then Z.
  pub fn get_chunks(&self, chunks: Rect) -> Result<Vec<u8>, InterfaceError> {
    let mut query = vec![
      ("x", chunks.x.to_string()),
      ("z", chunks.z.to_string()),
      ("dx", chunks.dx.to_string()),
      ("dz", chunks.dz.to_string()),
    ];
    if let Some(dim) = &self.dimension {
      query.push(("dimension", dim.clone()));
    }
    let res = self.get("chunks", &query, Some("application/octet-stream"))?;
    let mut bytes = vec![];
    res.into_reader().read_to_end(&mut bytes)?;
    debug!("got {} bytes for {chunks}", bytes.len());
    Ok(bytes)
  }

  /// Returns the build area set in-game. If it was never set, this returns
  /// [`InterfaceError::BuildAreaNotSet`].
  pub fn get_build_area(&self) -> Result<BuildArea, InterfaceError> {
    let res = match self.get("buildarea", &[], Some("application/json")) {
      Ok(res) => res,
      Err(InterfaceError::Status { .. }) => return Err(InterfaceError::BuildAreaNotSet),
      Err(e) => return Err(e),
    };
    let area: BuildAreaResponse = serde_json::from_reader(res.into_reader())?;
    match area {
      BuildAreaResponse::Set(area) => Ok(area),
      BuildAreaResponse::NotSet(_) => Err(InterfaceError::BuildAreaNotSet),
    }
  }

  /// Returns the Minecraft version the interface is running on.
  pub fn get_version(&self) -> Result<String, InterfaceError> {
    Ok(self.get("version", &[], None)?.into_string()?.trim().to_string())
  }
}

impl ChunkSource for Interface {
  type Error = InterfaceError;

  fn fetch_chunks(&self, chunks: Rect) -> Result<Vec<u8>, InterfaceError> {
    self.get_chunks(chunks)
  }
}
