pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Frames of a text scramble converging on `final_text`.
///
/// Frame `k` shows the first `k / 2` characters as final and fills the rest
/// with random alphanumerics, except the first character which is final from
/// frame 0. Once every character is revealed the sequence yields the exact
/// final text one last time and ends. It cannot be restarted.
pub struct Scramble<R> {
    target: Vec<char>,
    frame: usize,
    finished: bool,
    random: R,
}

impl<R: FnMut() -> f64> Scramble<R> {
    pub fn new(final_text: &str, random: R) -> Self {
        Self {
            target: final_text.chars().collect(),
            frame: 0,
            finished: false,
            random,
        }
    }

    pub fn revealed(&self) -> usize {
        (self.frame / 2).min(self.target.len())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn random_char(&mut self) -> char {
        let roll = (self.random)();
        let roll = if roll.is_finite() { roll.clamp(0.0, 1.0) } else { 0.0 };
        let index = ((roll * ALPHABET.len() as f64) as usize).min(ALPHABET.len() - 1);
        char::from(ALPHABET[index])
    }
}

impl<R: FnMut() -> f64> Iterator for Scramble<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        let revealed = self.frame / 2;
        if revealed >= self.target.len() {
            self.finished = true;
            return Some(self.target.iter().collect());
        }

        let mut rendered = String::with_capacity(self.target.len());
        for index in 0..self.target.len() {
            if index == 0 || index < revealed {
                rendered.push(self.target[index]);
            } else {
                let scrambled = self.random_char();
                rendered.push(scrambled);
            }
        }

        self.frame += 1;
        Some(rendered)
    }
}
