// Example demonstrating Generator output through a deliberately small buffer

use chunkjson::{Container, Error, Generator};

/// Repeats `call` until it fits, "transmitting" the buffer in between.
fn send<F>(generator: &mut Generator, wire: &mut Vec<u8>, mut call: F) -> Result<(), Error>
where
    F: FnMut(&mut Generator) -> Result<(), Error>,
{
    loop {
        match call(generator) {
            Err(Error::BufferFull) => {
                println!("  packet: {}", String::from_utf8_lossy(generator.buffer()));
                wire.extend_from_slice(generator.buffer());
                generator.clear_buffer();
            }
            result => return result,
        }
    }
}

fn main() -> Result<(), Error> {
    println!("Generator Demo with a 12 byte buffer");
    println!("====================================");

    let mut storage = [0u8; 12];
    let mut generator = Generator::new(&mut storage)?;
    let mut wire = Vec::new();

    send(&mut generator, &mut wire, |g| g.start_token(None, Container::Object))?;
    send(&mut generator, &mut wire, |g| g.add_name("station"))?;
    send(&mut generator, &mut wire, |g| g.add_string("north-ridge", false))?;
    send(&mut generator, &mut wire, |g| {
        g.start_token(Some("samples"), Container::Array)
    })?;
    for (i, sample) in ["12.5", "12.75", "-0.25"].iter().enumerate() {
        send(&mut generator, &mut wire, |g| g.add_float(sample))?;
        println!("  sample {} queued", i);
    }
    send(&mut generator, &mut wire, |g| g.end_token(Container::Array))?;
    send(&mut generator, &mut wire, |g| g.add_name("log"))?;
    for line in ["boot ok; ", "sensor ok; ", "uplink ok"] {
        send(&mut generator, &mut wire, |g| g.add_string(line, true))?;
    }
    send(&mut generator, &mut wire, |g| g.add_string("", false))?;
    send(&mut generator, &mut wire, |g| g.add_name("errors"))?;
    send(&mut generator, &mut wire, |g| g.add_uint(0))?;
    send(&mut generator, &mut wire, |g| g.end_token(Container::Object))?;

    println!("  packet: {}", String::from_utf8_lossy(generator.buffer()));
    wire.extend_from_slice(generator.buffer());

    println!();
    println!("Complete document ({} bytes):", wire.len());
    println!("{}", String::from_utf8_lossy(&wire));
    Ok(())
}
