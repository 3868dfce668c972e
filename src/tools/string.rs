//! Text transforms

use super::{PrimitiveType, ToolDefinition, ToolProvider, ToolSignature};
use rand::Rng;
use tracing::info;

const RANDOM_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const MAX_RANDOM_LENGTH: i32 = 100;

pub struct StringTools;

impl ToolProvider for StringTools {
    fn namespace(&self) -> &str {
        "String"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            ToolSignature::new("toUpperCase", "Convert text to upper case")
                .param("text", PrimitiveType::String, "Text to convert")
                .handler(|args| {
                    let text = args.text(0)?;
                    info!("toUpperCase: {}", text);
                    Ok(text.to_uppercase())
                }),
            ToolSignature::new("toLowerCase", "Convert text to lower case")
                .param("text", PrimitiveType::String, "Text to convert")
                .handler(|args| {
                    let text = args.text(0)?;
                    info!("toLowerCase: {}", text);
                    Ok(text.to_lowercase())
                }),
            ToolSignature::new("countCharacters", "Count characters and words in text")
                .param("text", PrimitiveType::String, "Text to count")
                .handler(|args| {
                    let text = args.text(0)?;
                    info!("countCharacters: {}", text);
                    Ok(count_characters(text))
                }),
            ToolSignature::new("reverseText", "Reverse text")
                .param("text", PrimitiveType::String, "Text to reverse")
                .handler(|args| {
                    let text = args.text(0)?;
                    info!("reverseText: {}", text);
                    Ok(text.chars().rev().collect())
                }),
            ToolSignature::new("generateRandomString", "Generate a random alphanumeric string")
                .param("length", PrimitiveType::Int, "Length of the string, 1 to 100")
                .handler(|args| {
                    let length = args.int(0)?;
                    info!("generateRandomString: length {}", length);
                    if !(1..=MAX_RANDOM_LENGTH).contains(&length) {
                        return Ok(format!("Error: length must be between 1 and {}", MAX_RANDOM_LENGTH));
                    }
                    Ok(format!("Random string: {}", random_string(length as usize)))
                }),
            ToolSignature::new("checkPalindrome", "Check whether text is a palindrome")
                .param("text", PrimitiveType::String, "Text to check")
                .handler(|args| {
                    let text = args.text(0)?;
                    info!("checkPalindrome: {}", text);
                    let verdict = if is_palindrome(text) { "is" } else { "is not" };
                    Ok(format!("Text \"{}\" {} a palindrome", text, verdict))
                }),
        ]
    }
}

fn count_characters(text: &str) -> String {
    let total = text.chars().count();
    let without_spaces = text.chars().filter(|c| *c != ' ').count();
    let words = text.split_whitespace().count();
    format!(
        "Characters: {}, without spaces: {}, words: {}",
        total, without_spaces, words
    )
}

fn random_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| RANDOM_CHARSET[rng.gen_range(0..RANDOM_CHARSET.len())] as char)
        .collect()
}

/// ASCII letters and digits only, case-insensitive
fn is_palindrome(text: &str) -> bool {
    let cleaned: Vec<char> = text
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    cleaned.iter().eq(cleaned.iter().rev())
}
