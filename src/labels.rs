//! Display strings for the drill in English and Japanese.

use crate::question::{Mode, QuestionKind};
use crate::range3::{BoardTexture, Bucket, HandClass, Seat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Ja,
}

pub fn mode_label(lang: Lang, mode: Mode) -> &'static str {
    match lang {
        Lang::En => match mode {
            Mode::Mixed => "Mixed",
            Mode::PotOdds => "Pot Odds",
            Mode::FoldEquity => "Fold Equity",
            Mode::Range3 => "Range 3",
        },
        Lang::Ja => match mode {
            Mode::Mixed => "ミックス",
            Mode::PotOdds => "ポットオッズ",
            Mode::FoldEquity => "フォールド・エクイティ",
            Mode::Range3 => "レンジ3",
        },
    }
}

pub fn bucket_label(lang: Lang, bucket: Bucket) -> &'static str {
    match lang {
        Lang::En => bucket.name(),
        Lang::Ja => match bucket {
            Bucket::Strong => "強い",
            Bucket::Medium => "普通",
            Bucket::Weak => "弱い",
        },
    }
}

/// Labels an option string; range-3 options are bucket names, anything else
/// is shown as-is.
pub fn option_label(lang: Lang, option: &str) -> String {
    match Bucket::from_name(option) {
        Some(bucket) => bucket_label(lang, bucket).to_string(),
        None => option.to_string(),
    }
}

pub fn seat_label(lang: Lang, seat: Seat) -> &'static str {
    match lang {
        Lang::En => match seat {
            Seat::InPosition => "IP (in position)",
            Seat::OutOfPosition => "OOP (out of position)",
        },
        Lang::Ja => match seat {
            Seat::InPosition => "IP（インポジション）",
            Seat::OutOfPosition => "OOP（アウトオブポジション）",
        },
    }
}

pub fn hand_label(lang: Lang, hand: HandClass) -> &'static str {
    match lang {
        Lang::En => hand.name(),
        Lang::Ja => match hand {
            HandClass::SetTrips => "セット/トリップス",
            HandClass::TwoPair => "ツーペア",
            HandClass::Overpair => "オーバーペア",
            HandClass::TopPairTopKicker => "トップペア・トップキッカー",
            HandClass::TopPairWeakKicker => "トップペア・弱いキッカー",
            HandClass::SecondPair => "セカンドペア",
            HandClass::Underpair => "アンダーペア",
            HandClass::NutFlushDrawOvercards => "ナッツFD＋オーバーカード",
            HandClass::StrongDraw => "強いドロー（OESD/NFD）",
            HandClass::WeakDraw => "弱いドロー（GS/BDFD）",
            HandClass::Air => "エア/バックドア",
        },
    }
}

pub fn board_label(lang: Lang, board: BoardTexture) -> &'static str {
    match lang {
        Lang::En => board.name(),
        Lang::Ja => match board {
            BoardTexture::DryHigh => "ドライハイ（A72r）",
            BoardTexture::Wet => "ウェット（T98hh）",
            BoardTexture::Paired => "ペアボード（KK2r）",
            BoardTexture::LowConnected => "ローカンネクテッド（654ss）",
        },
    }
}

pub fn kind_prompt(lang: Lang, kind: QuestionKind) -> &'static str {
    match (lang, kind) {
        (Lang::En, QuestionKind::PotOdds) => "Pot odds: equity needed to call",
        (Lang::En, QuestionKind::FoldEquity) => "Fold equity: break-even fold rate for a bluff",
        (Lang::En, QuestionKind::Range3) => "Range 3: classify the strength (Strong / Medium / Weak)",
        (Lang::Ja, QuestionKind::PotOdds) => "ポットオッズ: コールに必要なエクイティ",
        (Lang::Ja, QuestionKind::FoldEquity) => "フォールド・エクイティ: ブラフの損益分岐フォールド率",
        (Lang::Ja, QuestionKind::Range3) => "レンジ3: 強さを分類（強い / 普通 / 弱い）",
    }
}

/// Fixed interface strings.
pub struct Strings {
    pub title: &'static str,
    pub answered: &'static str,
    pub correct: &'static str,
    pub accuracy: &'static str,
    pub average: &'static str,
    pub seconds: &'static str,
    pub mistakes: &'static str,
    pub score: &'static str,
    pub combo: &'static str,
    pub best: &'static str,
    pub pot: &'static str,
    pub bet: &'static str,
    pub hand: &'static str,
    pub board: &'static str,
    pub position: &'static str,
    pub right: &'static str,
    pub wrong: &'static str,
    pub combo_over: &'static str,
    pub time_up: &'static str,
    pub session_done: &'static str,
    pub time_up_hint: &'static str,
    pub running: &'static str,
    pub paused: &'static str,
    pub review_on: &'static str,
    pub review_empty: &'static str,
    pub help: &'static str,
    pub unknown_command: &'static str,
    pub bye: &'static str,
    pub stats_reset: &'static str,
    pub mistakes_cleared: &'static str,
    pub kind: &'static str,
    pub spot: &'static str,
    pub answer: &'static str,
}

static EN: Strings = Strings {
    title: "FST Drill: poker math trainer",
    answered: "Answered",
    correct: "Correct",
    accuracy: "Accuracy",
    average: "Average",
    seconds: "s",
    mistakes: "Mistakes",
    score: "Score",
    combo: "Combo",
    best: "Best",
    pot: "Pot p",
    bet: "Bet b",
    hand: "Hand",
    board: "Board",
    position: "Position",
    right: "✅ Correct.",
    wrong: "❌ Wrong.",
    combo_over: "❌ Combo over",
    time_up: "Time's up",
    session_done: "Session complete.",
    time_up_hint: "r: reset timer   new: new question   q: quit",
    running: "running",
    paused: "paused",
    review_on: "Review mistakes only",
    review_empty: "No saved mistakes yet. Wrong answers are added here.",
    help: "Commands: 1-4 answer, n next, s start/pause, r reset timer, m <mixed|pot|fe|range3> mode, \
           t <minutes> duration, review on|off, stats reset, mistakes clear, new, h help, q quit",
    unknown_command: "Unknown command. Type h for help.",
    bye: "Bye.",
    stats_reset: "Stats reset.",
    mistakes_cleared: "Mistakes cleared.",
    kind: "Kind",
    spot: "Spot",
    answer: "Answer",
};

static JA: Strings = Strings {
    title: "FST ドリル: ポーカー数学トレーナー",
    answered: "回答数",
    correct: "正解",
    accuracy: "正答率",
    average: "平均",
    seconds: "秒",
    mistakes: "ミス",
    score: "スコア",
    combo: "コンボ",
    best: "自己ベスト",
    pot: "ポット p",
    bet: "ベット b",
    hand: "ハンド",
    board: "ボード",
    position: "ポジション",
    right: "✅ 正解。",
    wrong: "❌ 不正解。",
    combo_over: "❌ コンボ終了",
    time_up: "時間切れ",
    session_done: "セッション完了。",
    time_up_hint: "r: タイマーをリセット   new: 新しい問題を出す   q: 終了",
    running: "計測中",
    paused: "一時停止",
    review_on: "間違いのみ復習",
    review_empty: "保存されたミスはありません。間違えるとここに追加されます。",
    help: "コマンド: 1-4 選択, n 次へ, s 開始/一時停止, r リセット, m <mixed|pot|fe|range3> モード, \
           t <分> 時間設定, review on|off, stats reset 統計をリセット, mistakes clear ミスをクリア, new, h ヘルプ, q 終了",
    unknown_command: "不明なコマンドです。h でヘルプを表示します。",
    bye: "終了します。",
    stats_reset: "統計をリセットしました。",
    mistakes_cleared: "ミスをクリアしました。",
    kind: "種類",
    spot: "状況",
    answer: "正解",
};

impl Lang {
    pub fn strings(self) -> &'static Strings {
        match self {
            Lang::En => &EN,
            Lang::Ja => &JA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_messages_are_localised() {
        let (en, ja) = (Lang::En.strings(), Lang::Ja.strings());
        for (a, b) in [
            (en.stats_reset, ja.stats_reset),
            (en.mistakes_cleared, ja.mistakes_cleared),
            (en.kind, ja.kind),
            (en.spot, ja.spot),
            (en.answer, ja.answer),
            (en.position, ja.position),
        ] {
            assert_ne!(a, b);
        }
        assert_eq!(en.stats_reset, "Stats reset.");
    }

    #[test]
    fn test_option_label_translates_buckets_only() {
        assert_eq!(option_label(Lang::Ja, "Strong"), "強い");
        assert_eq!(option_label(Lang::Ja, "33.3%"), "33.3%");
    }
}
