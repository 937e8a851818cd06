// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ClientLookup, LookupError, LookupFields, LookupOutcome};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

type Scripted = (Duration, Result<LookupOutcome, LookupError>);

/// An in-process directory that answers from a script after a fixed delay.
#[derive(Debug, Default)]
pub struct ScriptedLookup {
    responses: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(
        self,
        dni: &str,
        delay: Duration,
        result: Result<LookupOutcome, LookupError>,
    ) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(dni.to_string(), (delay, result));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ClientLookup for ScriptedLookup {
    async fn lookup(&self, dni: &str) -> Result<LookupOutcome, LookupError> {
        self.calls.lock().unwrap().push(dni.to_string());
        let scripted: Option<Scripted> = self.responses.lock().unwrap().get(dni).cloned();
        let (delay, result) = scripted.unwrap_or((Duration::ZERO, Ok(LookupOutcome::NotFound)));
        tokio::time::sleep(delay).await;
        result
    }
}

pub fn fields(json: serde_json::Value) -> LookupFields {
    match json {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

pub fn found(json: serde_json::Value) -> Result<LookupOutcome, LookupError> {
    Ok(LookupOutcome::Found(fields(json)))
}
