mod cli;

use anyhow::{Result, anyhow};
use clap::Parser;

use hdlc::control::{Information, Supervisory, Unnumbered};
use hdlc::{Frame, INFO_MAX_LEN};

use cli::*;


fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    match args.command {
        Command::Encode { address, control, info } => cmd_encode(address, control, &info),
        Command::Decode { data } => cmd_decode(&data),
        Command::Control { layout } => cmd_control(layout),
    }
}

fn cmd_encode(address: u8, control: u8, info: &str) -> Result<()> {
    let info = hex::decode(info.trim())?;

    tracing::debug!(
        "encoding frame: address=0x{:02X} control=0x{:02X} info={} bytes",
        address,
        control,
        info.len()
    );

    let mut frame = Frame::new(address, control);
    frame
        .info
        .try_extend_from_slice(&info)
        .map_err(|_| anyhow!("information field exceeds {INFO_MAX_LEN} bytes"))?;

    let encoded = hdlc::encode_bytes(&frame);
    println!("{}", hex::encode(&encoded));

    Ok(())
}

fn cmd_decode(data: &str) -> Result<()> {
    let data = hex::decode(data.trim())?;

    tracing::debug!("decoding {} raw bytes", data.len());

    let frame = hdlc::decode(&data)?;

    println!("address: 0x{:02X}", frame.address);
    println!("control: 0x{:02X}", frame.control);

    let i = Information::from_byte(frame.control);
    println!("  as I-frame: ns={} pf={} nr={}", i.ns, i.pf, i.nr);

    let s = Supervisory::from_byte(frame.control);
    println!("  as S-frame: code={:?} pf={} nr={}", s.code, s.pf, s.nr);

    match Unnumbered::from_byte(frame.control) {
        Ok(u) => println!("  as U-frame: command={:?} pf={}", u.command, u.pf),
        Err(_) => println!("  as U-frame: unknown command"),
    }

    if frame.info.is_empty() {
        println!("info:    (empty)");
    } else {
        println!("info:    {}", hex::encode(frame.info.as_slice()));
    }

    Ok(())
}

fn cmd_control(layout: ControlLayout) -> Result<()> {
    let byte = match layout {
        ControlLayout::I { ns, pf, nr } => Information::new(ns, pf, nr).to_byte(),
        ControlLayout::S { code, pf, nr } => Supervisory::new(code.into(), pf, nr).to_byte(),
        ControlLayout::U { command, pf } => Unnumbered::new(command.into(), pf).to_byte(),
    };

    println!("0x{byte:02X}");

    Ok(())
}
