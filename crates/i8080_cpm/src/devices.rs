use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;

use i8080::{Device, DeviceContext};

/// BDOS function: print the character in E.
const C_WRITE: u8 = 2;
/// BDOS function: print the `$`-terminated string at DE.
const C_WRITESTR: u8 = 9;

/// Raises a shared flag on any write. Bound to the port trapped at 0x0000.
#[derive(Debug, Clone)]
pub struct FinishDevice {
    finished: Rc<Cell<bool>>,
}

impl FinishDevice {
    pub fn new(finished: Rc<Cell<bool>>) -> Self {
        Self { finished }
    }
}

impl Device for FinishDevice {
    fn write(&mut self, _value: u8, ctx: &DeviceContext<'_>) {
        log::debug!("warm boot reached, SP=0x{:04X}", ctx.registers().sp);
        self.finished.set(true);
    }
}

/// Minimal BDOS console. The function code is taken from C, the same way a
/// program calling `CALL 5` passes it.
#[derive(Debug, Clone)]
pub struct ConsoleDevice {
    output: Rc<RefCell<String>>,
    echo: bool,
}

impl ConsoleDevice {
    pub fn new(output: Rc<RefCell<String>>) -> Self {
        Self {
            output,
            echo: false,
        }
    }

    /// Also print everything to stdout as soon as it is produced.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    fn emit(&mut self, text: &str) {
        if self.echo {
            let mut stdout = std::io::stdout().lock();
            // Echo is best effort; the buffer always gets the text.
            let _ = stdout.write_all(text.as_bytes());
            let _ = stdout.flush();
        }
        self.output.borrow_mut().push_str(text);
    }
}

impl Device for ConsoleDevice {
    fn write(&mut self, _value: u8, ctx: &DeviceContext<'_>) {
        let regs = ctx.registers();
        match regs.c {
            C_WRITE => {
                let mut buf = [0u8; 4];
                self.emit(char::from(regs.e).encode_utf8(&mut buf));
            }
            C_WRITESTR => {
                // The string may run past 0xFFFF and continue from 0x0000.
                let memory = ctx.memory();
                let (tail, head) = memory.split_at(regs.de() as usize);
                let text: String = head
                    .iter()
                    .chain(tail)
                    .take_while(|&&byte| byte != b'$')
                    .map(|&byte| char::from(byte))
                    .collect();
                self.emit(&text);
            }
            other => log::trace!("ignoring BDOS function {other}"),
        }
    }
}
