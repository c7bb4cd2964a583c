use std::io::{self, Read};

use engine::game::{Direction, InputEvent};

/// What one keypress asks for. `Quit` belongs to the frontend; game
/// commands pass through as engine input events.
pub enum KeyCommand {
    Game(InputEvent),
    Quit,
    None,
}

pub fn read_command(stdin: &mut io::Stdin) -> KeyCommand {
    let mut buffer = [0u8; 3];
    let bytes_read = stdin.read(&mut buffer).unwrap_or(0);
    if bytes_read == 0 {
        return KeyCommand::None;
    }
    parse_bytes(&buffer[..bytes_read])
}

fn parse_bytes(bytes: &[u8]) -> KeyCommand {
    match bytes {
        // arrow keys arrive as 3-byte escape sequences
        [27, 91, 65] => KeyCommand::Game(InputEvent::Move(Direction::Up)),
        [27, 91, 66] => KeyCommand::Game(InputEvent::Move(Direction::Down)),
        [27, 91, 67] => KeyCommand::Game(InputEvent::Move(Direction::Right)),
        [27, 91, 68] => KeyCommand::Game(InputEvent::Move(Direction::Left)),

        [b'w'] | [b'W'] => KeyCommand::Game(InputEvent::Move(Direction::Up)),
        [b's'] | [b'S'] => KeyCommand::Game(InputEvent::Move(Direction::Down)),
        [b'a'] | [b'A'] => KeyCommand::Game(InputEvent::Move(Direction::Left)),
        [b'd'] | [b'D'] => KeyCommand::Game(InputEvent::Move(Direction::Right)),

        [b'r'] | [b'R'] => KeyCommand::Game(InputEvent::Restart),
        [b'c'] | [b'C'] => KeyCommand::Game(InputEvent::KeepPlaying),

        // q, Ctrl+C, bare Esc
        [b'q'] | [b'Q'] | [3] | [27] => KeyCommand::Quit,

        _ => KeyCommand::None,
    }
}

#[cfg(unix)]
pub fn enable_raw_mode() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        let fd = io::stdin().as_raw_fd();
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);
        termios.c_lflag &= !(libc::ICANON | libc::ECHO);
        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;
        libc::tcsetattr(fd, libc::TCSANOW, &termios);
    }
}

#[cfg(unix)]
pub fn disable_raw_mode() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        let fd = io::stdin().as_raw_fd();
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);
        termios.c_lflag |= libc::ICANON | libc::ECHO;
        libc::tcsetattr(fd, libc::TCSANOW, &termios);
    }
}

// Without raw mode every key needs Enter, but the game stays playable.
#[cfg(not(unix))]
pub fn enable_raw_mode() {}

#[cfg(not(unix))]
pub fn disable_raw_mode() {}
