// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Line-oriented frontend for the method channel.
//!
//! Stands in for the host framework's binary messenger: one JSON method call
//! per line in, one JSON response per line out.

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::handler::MethodChannelHandler;
use super::method::{MethodCall, MethodResponse};

/// Run the method channel over stdin/stdout until EOF.
pub async fn run_stdio(handler: Arc<MethodChannelHandler>) -> Result<()> {
    run_lines(handler, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Run the method channel over an arbitrary line stream.
pub async fn run_lines<R, W>(
    handler: Arc<MethodChannelHandler>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            info!("Frontend stream closed");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received: {}", trimmed);

        let response = match MethodCall::from_json(trimmed) {
            Ok(call) => handler.handle(call),
            Err(e) => {
                warn!("Malformed method call: {}", e);
                MethodResponse::NotImplemented
            }
        };

        let response_json = response.to_json()?;
        debug!("Sending: {}", response_json.trim());

        writer.write_all(response_json.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::BridgeHandler;
    use crate::channel::method::METHOD_GET_DATA;
    use crate::datalayer::MemoryDataLayer;
    use crate::role::DeviceRole;
    use crate::state::BridgeState;
    use tokio::io::AsyncReadExt;

    fn test_handler() -> Arc<MethodChannelHandler> {
        let (handset, _wearable) = MemoryDataLayer::pair(8);
        let layer = Arc::new(handset);
        let bridge = Arc::new(BridgeHandler::new(BridgeState::new(), layer.clone(), layer));
        Arc::new(MethodChannelHandler::new(bridge, DeviceRole::Phone))
    }

    #[tokio::test]
    async fn test_line_loop_dispatches_and_terminates_on_eof() {
        let handler = test_handler();
        let (mut client, server) = tokio::io::duplex(1024);
        let (server_read, server_write) = tokio::io::split(server);

        let loop_task =
            tokio::spawn(async move { run_lines(handler, server_read, server_write).await });

        let call = MethodCall::new(METHOD_GET_DATA).to_json().unwrap();
        client.write_all(call.as_bytes()).await.unwrap();

        let mut buf = vec![0u8; 1024];
        let n = client.read(&mut buf).await.unwrap();
        let response = MethodResponse::from_json(std::str::from_utf8(&buf[..n]).unwrap()).unwrap();
        assert_eq!(response, MethodResponse::no_data());

        drop(client);
        loop_task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_malformed_line_reports_not_implemented() {
        let handler = test_handler();
        let (mut client, server) = tokio::io::duplex(1024);
        let (server_read, server_write) = tokio::io::split(server);

        tokio::spawn(async move { run_lines(handler, server_read, server_write).await });

        client.write_all(b"not json\n").await.unwrap();

        let mut buf = vec![0u8; 1024];
        let n = client.read(&mut buf).await.unwrap();
        let response = MethodResponse::from_json(std::str::from_utf8(&buf[..n]).unwrap()).unwrap();
        assert_eq!(response, MethodResponse::NotImplemented);
    }
}
