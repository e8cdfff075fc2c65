use crate::style::color::Color;

pub fn parse_hex(raw: &str) -> Option<Color> {
    let bytes = raw.trim().as_bytes();
    if !validate(bytes) {
        return None;
    }

    let [r, g, b, a] = match bytes.len() {
        4 => {
            let r = hex_1_to_u8(bytes[1]);
            let g = hex_1_to_u8(bytes[2]);
            let b = hex_1_to_u8(bytes[3]);
            [r * 17, g * 17, b * 17, 255]
        }
        5 => {
            let r = hex_1_to_u8(bytes[1]);
            let g = hex_1_to_u8(bytes[2]);
            let b = hex_1_to_u8(bytes[3]);
            let a = hex_1_to_u8(bytes[4]);
            [r * 17, g * 17, b * 17, a * 17]
        }
        7 => {
            let r = hex_2_to_u8(bytes[1], bytes[2]);
            let g = hex_2_to_u8(bytes[3], bytes[4]);
            let b = hex_2_to_u8(bytes[5], bytes[6]);
            [r, g, b, 255]
        }
        9 => {
            let r = hex_2_to_u8(bytes[1], bytes[2]);
            let g = hex_2_to_u8(bytes[3], bytes[4]);
            let b = hex_2_to_u8(bytes[5], bytes[6]);
            let a = hex_2_to_u8(bytes[7], bytes[8]);
            [r, g, b, a]
        }
        _ => return None,
    };
    Some(Color::rgba(r, g, b, a))
}

fn validate(bytes: &[u8]) -> bool {
    let length = bytes.len();

    if length == 0 || bytes[0] != b'#' {
        return false;
    }

    if length != 4 && length != 5 && length != 7 && length != 9 {
        return false;
    }

    bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

fn hex_1_to_u8(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

fn hex_2_to_u8(c1: u8, c2: u8) -> u8 {
    (hex_1_to_u8(c1) << 4) | hex_1_to_u8(c2)
}
