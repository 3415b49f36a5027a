use crate::rpc::call_context::CallContext;
use crate::rpc::rpc_functions::{check_feasibility, solve_routing, JsonRpcRequest};
use json::JsonValue;
use std::error::Error;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;

pub fn handle_connection(mut socket: TcpStream) -> Result<(), Box<dyn Error>> {
    let request = read_request(&mut socket)?;
    let client_ip = socket.peer_addr()?.to_string();

    let call_context = CallContext::new(&client_ip, &request.id, &request.method);

    fn respond(
        socket: &mut TcpStream,
        id: JsonValue,
        result: Option<JsonValue>,
        error: Option<(i64, String)>,
        call_context: &CallContext,
    ) -> Result<(), Box<dyn Error>> {
        if let Some((code, message)) = error.as_ref() {
            call_context.log_message(&format!("Error (code: {}): {}", code, message));
        }
        let payload =
            jsonrpc_serialize_response(id, result, error.as_ref().map(|(c, m)| (*c, m.as_str())));
        socket.write_all(http_response(&payload).as_bytes())?;
        Ok(())
    }

    match request.method.as_str() {
        "solve_routing" => match solve_routing(&request, &call_context) {
            Ok(result) => respond(&mut socket, request.id, Some(result), None, &call_context),
            Err(e) => respond(
                &mut socket,
                request.id,
                None,
                Some((-32602, format!("Invalid routing request: {}", e))),
                &call_context,
            ),
        }?,
        "check_feasibility" => match check_feasibility(&request, &call_context) {
            Ok(result) => respond(&mut socket, request.id, Some(result), None, &call_context),
            Err(e) => respond(
                &mut socket,
                request.id,
                None,
                Some((-32602, format!("Invalid routing request: {}", e))),
                &call_context,
            ),
        }?,
        _ => {
            respond(
                &mut socket,
                request.id,
                None,
                Some((-32601, "Method not found".to_string())),
                &call_context,
            )?;
        }
    };

    Ok(())
}

fn read_payload(socket: &mut TcpStream) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut reader = BufReader::new(socket);
    let mut length = 0;
    for result in reader.by_ref().lines() {
        let l = result?;
        if l.is_empty() {
            break;
        }

        let header = "content-length: ";
        if l.to_lowercase().starts_with(header) {
            length = l[header.len()..].parse::<usize>()?;
        }
    }
    let mut payload = vec![0u8; length];

    reader.read_exact(payload.as_mut_slice())?;
    Ok(payload)
}

fn read_request(socket: &mut TcpStream) -> Result<JsonRpcRequest, Box<dyn Error>> {
    let payload = read_payload(socket)?;
    let mut request = json::parse(&String::from_utf8(payload)?)?;
    let id = request["id"].take();
    let params = request["params"].take();
    match request["method"].as_str() {
        Some(method) => Ok(JsonRpcRequest {
            id,
            method: method.to_string(),
            params,
        }),
        _ => Err(From::from(format!("Invalid JSON-RPC request: {}", request))),
    }
}

fn jsonrpc_serialize_response(
    id: JsonValue,
    result: Option<JsonValue>,
    error: Option<(i64, &str)>,
) -> String {
    let mut response = json::object! {
        jsonrpc: "2.0",
        id: id,
    };
    if let Some((code, message)) = error {
        response
            .insert(
                "error",
                json::object! {
                    code: code,
                    message: message,
                },
            )
            .unwrap();
    } else {
        response
            .insert("result", result.unwrap_or(JsonValue::Null))
            .unwrap();
    }
    response.dump()
}

fn http_response(json_payload: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
        json_payload.len(),
        json_payload
    )
}
