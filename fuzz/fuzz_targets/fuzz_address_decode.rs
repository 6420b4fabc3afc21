#![no_main]

use kyc_types::Address;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Anything accepted must re-encode to its own trimmed input.
    if let Ok(addr) = Address::decode(s) {
        assert_eq!(addr.to_string(), s.trim());
    }
});
