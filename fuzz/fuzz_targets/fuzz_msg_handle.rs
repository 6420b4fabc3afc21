#![no_main]

use kyc_keeper::{KeeperStores, Msg, MsgServer};
use kyc_nullables::{NullBank, NullStore};
use kyc_types::Address;
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    // Decode arbitrary bytes as a command and push it through the dispatcher.
    let Ok(msg) = serde_json::from_slice::<Msg>(data) else {
        return;
    };
    let store = Arc::new(NullStore::new(Address::from_bytes([1u8; 32])));
    let bank = Arc::new(NullBank::new());
    let mut server = MsgServer::new(KeeperStores::new(store, bank));
    let _ = server.handle(msg);
});
