pub struct CommandHelp {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub arguments: &'static [(&'static str, &'static str)],
}

pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: "cat",
        summary: "Print the contents of a file",
        usage: "cat FILE",
        arguments: &[],
    },
    CommandHelp {
        name: "cd",
        summary: "Change the current directory (not checked until next use)",
        usage: "cd [DIR]",
        arguments: &[("DIR", "Target directory (default: .)")],
    },
    CommandHelp {
        name: "exit",
        summary: "Leave the shell",
        usage: "exit",
        arguments: &[],
    },
    CommandHelp {
        name: "grep",
        summary: "Print lines of a file matching a regular expression",
        usage: "grep PATTERN FILE",
        arguments: &[
            ("PATTERN", "Regular expression, matched anywhere in the line"),
            ("FILE", "File to search"),
        ],
    },
    CommandHelp {
        name: "help",
        summary: "Show help for commands",
        usage: "help [COMMAND]",
        arguments: &[],
    },
    CommandHelp {
        name: "ls",
        summary: "List directory entries",
        usage: "ls [DIR] [KIND] [HIDDEN]",
        arguments: &[
            ("DIR", "Directory to list (default: .)"),
            ("KIND", "file, dir or both (default: both)"),
            ("HIDDEN", "true to include dotfiles (default: false)"),
        ],
    },
    CommandHelp {
        name: "pwd",
        summary: "Print the current directory",
        usage: "pwd",
        arguments: &[],
    },
    CommandHelp {
        name: "rm",
        summary: "Remove a file",
        usage: "rm FILE",
        arguments: &[],
    },
    CommandHelp {
        name: "touch",
        summary: "Create a file if it does not exist",
        usage: "touch FILE",
        arguments: &[],
    },
];

pub fn get_help(name: &str) -> Option<&'static CommandHelp> {
    COMMANDS.iter().find(|c| c.name == name)
}

pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

pub fn format_help(cmd: &CommandHelp) -> String {
    let mut out = format!("{} - {}\n\nUsage: {}\n", cmd.name, cmd.summary, cmd.usage);
    if !cmd.arguments.is_empty() {
        out.push_str("\nArguments:\n");
        for (arg, desc) in cmd.arguments {
            out.push_str(&format!("  {arg:16} {desc}\n"));
        }
    }
    out
}

pub fn format_help_list() -> String {
    let mut out = String::from("msh - commands\n\n");
    for cmd in COMMANDS {
        out.push_str(&format!("  {:8} {}\n", cmd.name, cmd.summary));
    }
    out.push_str("\nUse 'help COMMAND' for more information.\n");
    out
}
