// Example demonstrating Parser fed in small chunks through ChunkReader

use chunkjson::{ChunkReader, Error, Parser, TokenType};

fn main() -> Result<(), Error> {
    println!("Parser Demo with ChunkReader");
    println!("============================");

    let json = br#"{"name": "hello\nworld", "items": [1, -2, 2.5, true, null], "note": "caf\u00e9"}"#;
    println!("Input JSON: {}", String::from_utf8_lossy(json));
    println!("Total size: {} bytes", json.len());
    println!();

    let mut storage = [0u8; 16];
    let mut parser = Parser::new(&mut storage)?;
    let mut reader = ChunkReader::new(json, 8);

    loop {
        let token = parser.next()?;
        let indent = "  ".repeat(token.level + 1);
        let name = parser.name().to_string();
        let label = if name.is_empty() {
            String::new()
        } else {
            format!("{name}: ")
        };

        match token.kind {
            TokenType::Unknown => {
                let accepted = reader.feed(&mut parser)?;
                if accepted == 0 && reader.is_done() {
                    println!("input ended before the document did");
                    break;
                }
            }
            TokenType::None => {
                println!("done");
                break;
            }
            TokenType::ObjectStart => println!("{indent}{label}{{"),
            TokenType::ObjectEnd => println!("{indent}}}"),
            TokenType::ArrayStart => println!("{indent}{label}["),
            TokenType::ArrayEnd => println!("{indent}]"),
            TokenType::Boolean => println!("{indent}{label}{}", parser.get_boolean()?),
            TokenType::Null => {
                parser.get_null()?;
                println!("{indent}{label}null");
            }
            TokenType::Integer => println!("{indent}{label}{}", parser.get_int()?),
            TokenType::UInteger => println!("{indent}{label}{}", parser.get_uint()?),
            TokenType::Float => {
                let mut text = [0u8; 32];
                println!("{indent}{label}{}", parser.get_float(&mut text)?);
            }
            TokenType::String => {
                let mut value = Vec::new();
                let mut piece = [0u8; 4];
                loop {
                    let chunk = parser.get_string(&mut piece)?;
                    value.extend_from_slice(&piece[..chunk.len]);
                    if !chunk.is_partial {
                        break;
                    }
                    if chunk.len == 0 && parser.info(false).buffer_left == 0 {
                        reader.feed(&mut parser)?;
                    }
                }
                println!("{indent}{label}{:?}", String::from_utf8_lossy(&value));
            }
        }
    }
    Ok(())
}
