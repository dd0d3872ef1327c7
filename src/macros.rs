#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::libs::print::print_arg(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ({
        $crate::libs::print::print_arg(format_args!("{}\n", format_args!($($arg)*)));
    })
}
