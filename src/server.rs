use crate::rpc::rpc_handler::handle_connection;
use std::net::TcpListener;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

/// Accept loop with a bounded hand-off queue and a fixed worker pool.
/// Every connection is one self-contained request; the workers share
/// nothing but the receiving end of the queue.
pub fn start_server(listen_at: &str, queue_size: usize, threads: u64) {
    let (sender, receiver) = mpsc::sync_channel(queue_size);
    let protected_receiver = Arc::new(Mutex::new(receiver));
    for _ in 0..threads {
        let rec = protected_receiver.clone();
        thread::spawn(move || loop {
            let socket = rec.lock().unwrap().recv().unwrap();
            match handle_connection(socket) {
                Ok(()) => {}
                Err(e) => {
                    eprintln!("Error handling connection: {e}");
                }
            }
        });
    }
    let listener = TcpListener::bind(listen_at).expect("Could not create server.");
    loop {
        match listener.accept() {
            Ok((socket, _)) => match sender.try_send(socket) {
                Ok(()) => {}
                Err(e) => eprintln!("Queue full: {e}"),
            },
            Err(e) => eprintln!("Error accepting connection: {e}"),
        }
    }
}
