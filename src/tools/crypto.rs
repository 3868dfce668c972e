//! Encoding, hashing and password strength

use super::{PrimitiveType, ToolDefinition, ToolProvider, ToolSignature};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use md5::Md5;
use sha2::{Digest, Sha256};
use tracing::info;

const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

pub struct CryptoTools;

impl ToolProvider for CryptoTools {
    fn namespace(&self) -> &str {
        "Crypto"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            ToolSignature::new("base64Encode", "Base64-encode text")
                .param("text", PrimitiveType::String, "Text to encode")
                .handler(|args| {
                    info!("base64Encode");
                    Ok(format!("Base64 encoded: {}", STANDARD.encode(args.text(0)?)))
                }),
            ToolSignature::new("base64Decode", "Decode Base64 text")
                .param("encodedText", PrimitiveType::String, "Base64 text to decode")
                .handler(|args| {
                    info!("base64Decode");
                    Ok(match STANDARD.decode(args.text(0)?) {
                        Ok(bytes) => format!("Base64 decoded: {}", String::from_utf8_lossy(&bytes)),
                        Err(_) => "Error: invalid Base64 input".to_string(),
                    })
                }),
            ToolSignature::new("md5Hash", "MD5 hash of text")
                .param("text", PrimitiveType::String, "Text to hash")
                .handler(|args| {
                    info!("md5Hash");
                    Ok(format!("MD5 hash: {}", hex::encode(Md5::digest(args.text(0)?))))
                }),
            ToolSignature::new("sha256Hash", "SHA-256 hash of text")
                .param("text", PrimitiveType::String, "Text to hash")
                .handler(|args| {
                    info!("sha256Hash");
                    Ok(format!("SHA-256 hash: {}", hex::encode(Sha256::digest(args.text(0)?))))
                }),
            ToolSignature::new("analyzePasswordStrength", "Simple password strength analysis")
                .param("password", PrimitiveType::String, "Password to analyze")
                .handler(|args| {
                    info!("analyzePasswordStrength");
                    Ok(analyze_password(args.text(0)?))
                }),
        ]
    }
}

fn analyze_password(password: &str) -> String {
    let length = password.chars().count();
    let checks = [
        (length >= 8, "length >= 8", Some("length under 8")),
        (length >= 12, "length >= 12", None),
        (password.chars().any(|c| c.is_ascii_lowercase()), "contains lower case letters", None),
        (password.chars().any(|c| c.is_ascii_uppercase()), "contains upper case letters", None),
        (password.chars().any(|c| c.is_ascii_digit()), "contains digits", None),
        (password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)), "contains special characters", None),
    ];

    let mut score = 0;
    let mut output = String::from("Password analysis:\n");
    for (passed, pass_note, fail_note) in checks {
        if passed {
            score += 1;
            output.push_str(&format!("✓ {}\n", pass_note));
        } else if let Some(note) = fail_note {
            output.push_str(&format!("✗ {}\n", note));
        }
    }

    let strength = match score {
        0..=2 => "weak",
        3..=4 => "medium",
        5 => "strong",
        _ => "very strong",
    };

    output.push_str(&format!("\nScore: {}/{} - strength: {}", score, checks.len(), strength));
    output
}
