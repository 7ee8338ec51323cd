use clap::{Parser, Subcommand, ValueEnum};

use hdlc::control::{SupervisoryCode, UnnumberedCommand};


/// Encode and decode HDLC frames on the command line
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a frame to its hex wire representation
    Encode {
        /// Station address byte (decimal or 0x-prefixed hex)
        #[arg(short, long, value_parser = parse_byte)]
        address: u8,

        /// Raw control byte (use the control subcommand to build one)
        #[arg(short, long, value_parser = parse_byte)]
        control: u8,

        /// Information payload as a hex string
        #[arg(short, long, default_value = "")]
        info: String,
    },

    /// Decode a hex wire representation into a frame
    Decode {
        /// Encoded frame as a hex string
        data: String,
    },

    /// Build a control byte from named fields
    Control {
        #[command(subcommand)]
        layout: ControlLayout,
    },
}

#[derive(Debug, Subcommand)]
pub enum ControlLayout {
    /// Information frame: N(S), P/F, N(R)
    I {
        /// Send sequence number (0..7)
        #[arg(long, default_value_t = 0)]
        ns: u8,

        /// Poll/final bit
        #[arg(long, default_value_t = 0)]
        pf: u8,

        /// Receive sequence number (0..7)
        #[arg(long, default_value_t = 0)]
        nr: u8,
    },

    /// Supervisory frame: function code, P/F, N(R)
    S {
        /// Supervisory function code
        #[arg(long)]
        code: SCode,

        /// Poll/final bit
        #[arg(long, default_value_t = 0)]
        pf: u8,

        /// Receive sequence number (0..7)
        #[arg(long, default_value_t = 0)]
        nr: u8,
    },

    /// Unnumbered frame: command, P/F
    U {
        /// Unnumbered command
        #[arg(long)]
        command: UCommand,

        /// Poll/final bit
        #[arg(long, default_value_t = 0)]
        pf: u8,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SCode {
    /// Receive ready
    Rr,
    /// Reject
    Rej,
    /// Receive not ready
    Rnr,
    /// Selective reject
    Srej,
}

impl From<SCode> for SupervisoryCode {
    fn from(value: SCode) -> Self {
        match value {
            SCode::Rr => Self::ReceiveReady,
            SCode::Rej => Self::Reject,
            SCode::Rnr => Self::ReceiveNotReady,
            SCode::Srej => Self::SelectiveReject,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UCommand {
    /// Set normal response mode
    Snrm,
    /// Set asynchronous balanced mode
    Sabm,
    /// Set asynchronous balanced mode extended
    Sabme,
    /// Disconnect
    Disc,
    /// Unnumbered acknowledgement
    Ua,
    /// Reset send and receive sequence numbers
    Rset,
    /// Frame reject
    Frmr,
}

impl From<UCommand> for UnnumberedCommand {
    fn from(value: UCommand) -> Self {
        match value {
            UCommand::Snrm => Self::Snrm,
            UCommand::Sabm => Self::Sabm,
            UCommand::Sabme => Self::Sabme,
            UCommand::Disc => Self::Disc,
            UCommand::Ua => Self::Ua,
            UCommand::Rset => Self::Rset,
            UCommand::Frmr => Self::Frmr,
        }
    }
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let s = s.trim();

    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };

    parsed.map_err(|e| e.to_string())
}
