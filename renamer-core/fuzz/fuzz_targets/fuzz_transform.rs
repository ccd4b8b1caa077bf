#![no_main]

use libfuzzer_sys::fuzz_target;
use renamer_core::{transform, RenameRule, RuleKind};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let kind = RuleKind::ALL[usize::from(data[0]) % RuleKind::ALL.len()];
    let use_regex = data[1] & 1 == 1;
    let input = String::from_utf8_lossy(&data[2..]);
    let mut parts = input.splitn(3, '\n').map(|s| s.chars().take(64).collect::<String>());

    let (Some(name), Some(find)) = (parts.next(), parts.next()) else {
        return;
    };
    let replace = parts.next().unwrap_or_default();

    let rule = RenameRule::new(kind, find, replace).with_regex(use_regex);
    let _ = transform(&name, &rule);

    // Inactive rules never touch the name
    assert_eq!(transform(&name, &rule.active(false)), name);
});
